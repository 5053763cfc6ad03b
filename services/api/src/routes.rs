use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::json;

use crate::infra::{
    AppState, InMemoryInquiryRepository, InMemoryPropertyRepository, InMemoryUserRepository,
};
use addis_estate::accounts::{accounts_router, AccountsState};
use addis_estate::inquiries::{inquiries_router, InquiriesState};
use addis_estate::listings::{listings_router, ListingsState};
use addis_estate::moderation::{admin_router, AdminState};

pub(crate) type Users = InMemoryUserRepository;
pub(crate) type Properties = InMemoryPropertyRepository;
pub(crate) type Inquiries = InMemoryInquiryRepository;

/// Compose the domain routers with the service plumbing endpoints.
pub(crate) fn marketplace_router(
    accounts: AccountsState<Users>,
    listings: ListingsState<Users, Properties>,
    inquiries: InquiriesState<Users, Inquiries, Properties>,
    admin: AdminState<Users, Properties, Inquiries>,
) -> Router {
    accounts_router(accounts)
        .merge(listings_router(listings))
        .merge(inquiries_router(inquiries))
        .merge(admin_router(admin))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
