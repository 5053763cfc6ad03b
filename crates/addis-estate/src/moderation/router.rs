use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::service::ModerationService;
use crate::accounts::{Role, User, UserFilter, UserId, UserRepository, UserView};
use crate::auth::AuthGuard;
use crate::error::ApiError;
use crate::inquiries::InquiryRepository;
use crate::listings::{ListingFilter, ListingQuery, PropertyId, PropertyRepository, ADMIN_PAGE_LIMIT};
use crate::pagination::PageSpec;
use crate::validate::FieldError;

/// Shared state for the admin endpoints.
pub struct AdminState<U, P, I> {
    pub service: Arc<ModerationService<U, P, I>>,
    pub guard: Arc<AuthGuard<U>>,
}

impl<U, P, I> Clone for AdminState<U, P, I> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            guard: self.guard.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub role: Option<String>,
    pub approved: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RejectionBody {
    pub reason: Option<String>,
}

pub fn admin_router<U, P, I>(state: AdminState<U, P, I>) -> Router
where
    U: UserRepository + 'static,
    P: PropertyRepository + 'static,
    I: InquiryRepository + 'static,
{
    Router::new()
        .route("/api/admin/dashboard", get(dashboard_handler::<U, P, I>))
        .route("/api/admin/users", get(list_users_handler::<U, P, I>))
        .route(
            "/api/admin/users/:id/approve",
            put(approve_user_handler::<U, P, I>),
        )
        .route(
            "/api/admin/users/:id/reject",
            put(reject_user_handler::<U, P, I>),
        )
        .route(
            "/api/admin/users/:id",
            delete(delete_user_handler::<U, P, I>),
        )
        .route(
            "/api/admin/properties",
            get(list_properties_handler::<U, P, I>),
        )
        .route(
            "/api/admin/properties/:id/approve",
            put(approve_property_handler::<U, P, I>),
        )
        .route(
            "/api/admin/properties/:id/reject",
            put(reject_property_handler::<U, P, I>),
        )
        .with_state(state)
}

/// Authenticate and require the admin role; every handler below runs this
/// before touching the service.
fn require_admin<U, P, I>(
    state: &AdminState<U, P, I>,
    headers: &HeaderMap,
) -> Result<User, ApiError>
where
    U: UserRepository + 'static,
{
    let user = state.guard.authenticate(headers)?;
    state.guard.authorize(&user, &[Role::Admin])?;
    Ok(user)
}

pub(crate) async fn dashboard_handler<U, P, I>(
    State(state): State<AdminState<U, P, I>>,
    headers: HeaderMap,
) -> Result<Response, ApiError>
where
    U: UserRepository + 'static,
    P: PropertyRepository + 'static,
    I: InquiryRepository + 'static,
{
    require_admin(&state, &headers)?;
    let summary = state.service.dashboard()?;

    Ok(Json(json!({
        "success": true,
        "data": summary,
    }))
    .into_response())
}

pub(crate) async fn list_users_handler<U, P, I>(
    State(state): State<AdminState<U, P, I>>,
    headers: HeaderMap,
    Query(query): Query<UserListQuery>,
) -> Result<Response, ApiError>
where
    U: UserRepository + 'static,
    P: PropertyRepository + 'static,
    I: InquiryRepository + 'static,
{
    require_admin(&state, &headers)?;

    let filter = user_filter(&query)?;
    let spec = PageSpec::new(query.page, query.limit, ADMIN_PAGE_LIMIT);
    let page = state.service.list_users(&filter, &spec)?;

    Ok(Json(json!({
        "success": true,
        "count": page.items.len(),
        "total": page.total,
        "pagination": page.pagination,
        "data": page.items,
    }))
    .into_response())
}

pub(crate) async fn approve_user_handler<U, P, I>(
    State(state): State<AdminState<U, P, I>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError>
where
    U: UserRepository + 'static,
    P: PropertyRepository + 'static,
    I: InquiryRepository + 'static,
{
    require_admin(&state, &headers)?;
    let user = state.service.approve_user(&UserId(id))?;

    Ok(Json(json!({
        "success": true,
        "message": "User approved successfully",
        "data": UserView::from(&user),
    }))
    .into_response())
}

pub(crate) async fn reject_user_handler<U, P, I>(
    State(state): State<AdminState<U, P, I>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError>
where
    U: UserRepository + 'static,
    P: PropertyRepository + 'static,
    I: InquiryRepository + 'static,
{
    require_admin(&state, &headers)?;
    let user = state.service.reject_user(&UserId(id))?;

    Ok(Json(json!({
        "success": true,
        "message": "User approval revoked",
        "data": UserView::from(&user),
    }))
    .into_response())
}

pub(crate) async fn delete_user_handler<U, P, I>(
    State(state): State<AdminState<U, P, I>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError>
where
    U: UserRepository + 'static,
    P: PropertyRepository + 'static,
    I: InquiryRepository + 'static,
{
    require_admin(&state, &headers)?;
    state.service.delete_user(&UserId(id))?;

    Ok(Json(json!({
        "success": true,
        "message": "User deleted successfully",
    }))
    .into_response())
}

pub(crate) async fn list_properties_handler<U, P, I>(
    State(state): State<AdminState<U, P, I>>,
    headers: HeaderMap,
    Query(query): Query<ListingQuery>,
) -> Result<Response, ApiError>
where
    U: UserRepository + 'static,
    P: PropertyRepository + 'static,
    I: InquiryRepository + 'static,
{
    require_admin(&state, &headers)?;

    let (filter, sort, spec) = ListingFilter::admin(&query)?;
    let page = state.service.list_properties(&filter, sort, &spec)?;

    Ok(Json(json!({
        "success": true,
        "count": page.items.len(),
        "total": page.total,
        "pagination": page.pagination,
        "data": page.items,
    }))
    .into_response())
}

pub(crate) async fn approve_property_handler<U, P, I>(
    State(state): State<AdminState<U, P, I>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError>
where
    U: UserRepository + 'static,
    P: PropertyRepository + 'static,
    I: InquiryRepository + 'static,
{
    let admin = require_admin(&state, &headers)?;
    let property = state.service.approve_property(&admin.id, &PropertyId(id))?;

    Ok(Json(json!({
        "success": true,
        "message": "Property approved successfully",
        "data": property,
    }))
    .into_response())
}

pub(crate) async fn reject_property_handler<U, P, I>(
    State(state): State<AdminState<U, P, I>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    body: Option<Json<RejectionBody>>,
) -> Result<Response, ApiError>
where
    U: UserRepository + 'static,
    P: PropertyRepository + 'static,
    I: InquiryRepository + 'static,
{
    require_admin(&state, &headers)?;
    let reason = body.and_then(|Json(body)| body.reason);
    let property = state.service.reject_property(&PropertyId(id), reason)?;

    Ok(Json(json!({
        "success": true,
        "message": "Property rejected",
        "data": property,
    }))
    .into_response())
}

fn user_filter(query: &UserListQuery) -> Result<UserFilter, ApiError> {
    let role = match query.role.as_deref().map(str::trim).filter(|r| !r.is_empty()) {
        Some("buyer") => Some(Role::Buyer),
        Some("seller") => Some(Role::Seller),
        Some("landlord") => Some(Role::Landlord),
        Some("agent") => Some(Role::Agent),
        Some("admin") => Some(Role::Admin),
        Some(_) => {
            return Err(ApiError::Validation(vec![FieldError {
                field: "role",
                message: "Invalid user role",
            }]))
        }
        None => None,
    };

    // Only the literal strings narrow the listing, as with feature flags.
    let approved = match query.approved.as_deref() {
        Some("true") => Some(true),
        Some("false") => Some(false),
        _ => None,
    };

    Ok(UserFilter { role, approved })
}
