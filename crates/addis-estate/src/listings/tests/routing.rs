use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::*;
use crate::accounts::{Role, UserRepository};
use crate::auth::AuthGuard;
use crate::listings::{listings_router, ListingStatus, ListingsState, PropertyRepository};
use crate::testing::{property, token_authority, user, MemoryProperties, MemoryUsers};

struct Harness {
    router: axum::Router,
    properties: Arc<MemoryProperties>,
    users: Arc<MemoryUsers>,
    tokens: Arc<crate::auth::TokenAuthority>,
}

fn harness() -> Harness {
    let (service, properties, users) = build_service();
    let tokens = token_authority();
    let guard = Arc::new(AuthGuard::new(users.clone(), tokens.clone()));
    let router = listings_router(ListingsState { service, guard });
    Harness {
        router,
        properties,
        users,
        tokens,
    }
}

async fn read_json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("body is json")
}

fn draft_body() -> Value {
    json!({
        "title": "Bole apartment",
        "description": "Well-lit two bedroom apartment close to the ring road",
        "category": "apartment_sale",
        "type": "apartment",
        "price": 4_500_000u64,
        "area": {"size": 85.0, "unit": "sqm"},
        "location": {"city": "Addis Ababa", "subcity": "Bole"},
    })
}

fn post_listing(token: &str, body: Value) -> Request<Body> {
    Request::post("/api/properties")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn unapproved_sellers_cannot_create_listings() {
    let h = harness();
    let seller = h
        .users
        .insert(user(Role::Seller, "seller@x.com", "+251911111111"))
        .expect("seller stored");
    let token = h.tokens.issue(seller.id).expect("token issues");

    let response = h
        .router
        .oneshot(post_listing(&token, draft_body()))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let payload = read_json_body(response).await;
    assert_eq!(payload["message"], json!("Account approval required"));
}

#[tokio::test]
async fn buyers_cannot_create_listings_regardless_of_approval() {
    let h = harness();
    let buyer = h
        .users
        .insert(user(Role::Buyer, "buyer@x.com", "+251911111111"))
        .expect("buyer stored");
    let token = h.tokens.issue(buyer.id).expect("token issues");

    let response = h
        .router
        .oneshot(post_listing(&token, draft_body()))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn approved_sellers_create_pending_listings() {
    let h = harness();
    let seller = approved_seller(&h.users, "seller@x.com", "+251911111111");
    let token = h.tokens.issue(seller.id).expect("token issues");

    let response = h
        .router
        .oneshot(post_listing(&token, draft_body()))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["data"]["status"], json!("pending"));
    assert_eq!(payload["data"]["views"], json!(0));
}

#[tokio::test]
async fn public_fetch_404s_for_pending_and_counts_views_for_approved() {
    let h = harness();
    let seller = approved_seller(&h.users, "seller@x.com", "+251911111111");

    let pending = h
        .properties
        .insert(property(&seller.id, ListingStatus::Pending, "Hidden", 0))
        .expect("stored");
    let approved = h
        .properties
        .insert(property(&seller.id, ListingStatus::Approved, "Visible", 0))
        .expect("stored");

    let hidden = h
        .router
        .clone()
        .oneshot(
            Request::get(format!("/api/properties/{}", pending.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");
    assert_eq!(hidden.status(), StatusCode::NOT_FOUND);

    for expected_views in 1..=2u64 {
        let response = h
            .router
            .clone()
            .oneshot(
                Request::get(format!("/api/properties/{}", approved.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["data"]["views"], json!(expected_views));
        assert_eq!(
            payload["data"]["ownerContact"]["email"],
            json!("seller@x.com")
        );
    }
}

#[tokio::test]
async fn search_envelope_reports_pagination() {
    let h = harness();
    let seller = approved_seller(&h.users, "seller@x.com", "+251911111111");
    for i in 0..3 {
        h.properties
            .insert(property(
                &seller.id,
                ListingStatus::Approved,
                &format!("Listing {i}"),
                i,
            ))
            .expect("stored");
    }

    let response = h
        .router
        .oneshot(
            Request::get("/api/properties?limit=2&page=1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["count"], json!(2));
    assert_eq!(payload["total"], json!(3));
    assert_eq!(payload["pagination"]["pages"], json!(2));
    assert_eq!(payload["pagination"]["hasNext"], json!(true));
    assert_eq!(payload["pagination"]["hasPrev"], json!(false));
}

#[tokio::test]
async fn update_by_non_owner_returns_403() {
    let h = harness();
    let seller = approved_seller(&h.users, "seller@x.com", "+251911111111");
    let intruder = h
        .users
        .insert(user(Role::Buyer, "other@x.com", "+251922222222"))
        .expect("stored");
    let listing = h
        .properties
        .insert(property(&seller.id, ListingStatus::Approved, "Target", 0))
        .expect("stored");

    let token = h.tokens.issue(intruder.id).expect("token issues");
    let response = h
        .router
        .oneshot(
            Request::put(format!("/api/properties/{}", listing.id))
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::from(
                    serde_json::to_vec(&json!({"title": "Hijacked listing"})).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload["message"],
        json!("Not authorized to modify this property")
    );
}
