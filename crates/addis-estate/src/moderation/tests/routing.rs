use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::*;
use crate::accounts::{Role, User, UserRepository};
use crate::auth::AuthGuard;
use crate::listings::{ListingStatus, PropertyRepository};
use crate::moderation::{admin_router, AdminState};
use crate::testing::{property, token_authority, user, MemoryProperties, MemoryUsers};

struct Harness {
    router: axum::Router,
    users: Arc<MemoryUsers>,
    properties: Arc<MemoryProperties>,
    tokens: Arc<crate::auth::TokenAuthority>,
}

fn harness() -> Harness {
    let (service, users, properties, _) = build_service();
    let tokens = token_authority();
    let guard = Arc::new(AuthGuard::new(users.clone(), tokens.clone()));
    let router = admin_router(AdminState { service, guard });
    Harness {
        router,
        users,
        properties,
        tokens,
    }
}

impl Harness {
    fn stored_admin(&self) -> (User, String) {
        let admin = self
            .users
            .insert(user(Role::Admin, "admin@x.com", "+251900000000"))
            .expect("admin stored");
        let token = self.tokens.issue(admin.id).expect("token issues");
        (admin, token)
    }
}

async fn read_json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("body is json")
}

fn put(uri: &str, token: &str) -> Request<Body> {
    Request::put(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn non_admins_are_forbidden_everywhere() {
    let h = harness();
    let seller = h
        .users
        .insert(user(Role::Seller, "seller@x.com", "+251911111111"))
        .expect("seller stored");
    let token = h.tokens.issue(seller.id).expect("token issues");

    let response = h
        .router
        .clone()
        .oneshot(
            Request::get("/api/admin/dashboard")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let unauthenticated = h
        .router
        .oneshot(
            Request::get("/api/admin/users")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");
    assert_eq!(unauthenticated.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn approve_user_flow_flips_both_flags() {
    let h = harness();
    let (_, token) = h.stored_admin();
    let seller = h
        .users
        .insert(user(Role::Seller, "seller@x.com", "+251911111111"))
        .expect("seller stored");

    let response = h
        .router
        .oneshot(put(
            &format!("/api/admin/users/{}/approve", seller.id),
            &token,
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["data"]["isApproved"], json!(true));
    assert_eq!(payload["data"]["isVerified"], json!(true));
}

#[tokio::test]
async fn deleting_an_admin_target_is_forbidden() {
    let h = harness();
    let (_, token) = h.stored_admin();
    let other_admin = h
        .users
        .insert(user(Role::Admin, "admin2@x.com", "+251900000001"))
        .expect("admin stored");

    let response = h
        .router
        .oneshot(
            Request::delete(format!("/api/admin/users/{}", other_admin.id))
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(h
        .users
        .fetch(&other_admin.id)
        .expect("fetch succeeds")
        .is_some());
}

#[tokio::test]
async fn property_moderation_endpoints_approve_and_reject() {
    let h = harness();
    let (admin, token) = h.stored_admin();
    let seller = h
        .users
        .insert(user(Role::Seller, "seller@x.com", "+251911111111"))
        .expect("seller stored");
    let listing = h
        .properties
        .insert(property(&seller.id, ListingStatus::Pending, "Bole apartment", 0))
        .expect("listing stored");

    let approve = h
        .router
        .clone()
        .oneshot(put(
            &format!("/api/admin/properties/{}/approve", listing.id),
            &token,
        ))
        .await
        .expect("route executes");
    assert_eq!(approve.status(), StatusCode::OK);
    let payload = read_json_body(approve).await;
    assert_eq!(payload["data"]["status"], json!("approved"));
    assert_eq!(payload["data"]["approvedBy"], json!(admin.id));

    let reject = h
        .router
        .oneshot(
            Request::put(format!("/api/admin/properties/{}/reject", listing.id))
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::from(
                    serde_json::to_vec(&json!({"reason": "Incomplete documents"})).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .expect("route executes");
    assert_eq!(reject.status(), StatusCode::OK);
    let payload = read_json_body(reject).await;
    assert_eq!(payload["data"]["status"], json!("rejected"));
    assert_eq!(payload["data"]["rejectionReason"], json!("Incomplete documents"));
}

#[tokio::test]
async fn moderating_a_missing_property_returns_404() {
    let h = harness();
    let (_, token) = h.stored_admin();

    let response = h
        .router
        .oneshot(put(
            &format!("/api/admin/properties/{}/approve", uuid::Uuid::new_v4()),
            &token,
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["message"], json!("Property not found"));
}
