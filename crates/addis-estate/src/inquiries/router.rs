use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::domain::{InquiryId, InquiryReply, InquiryStatus, NewInquiry};
use super::repository::InquiryRepository;
use super::service::InquiryService;
use crate::accounts::UserRepository;
use crate::auth::AuthGuard;
use crate::error::ApiError;
use crate::listings::{PropertyRepository, ADMIN_PAGE_LIMIT};
use crate::pagination::PageSpec;
use crate::validate::{self, FieldError};

/// Shared state for the inquiry endpoints.
pub struct InquiriesState<U, I, P> {
    pub service: Arc<InquiryService<I, P>>,
    pub guard: Arc<AuthGuard<U>>,
}

impl<U, I, P> Clone for InquiriesState<U, I, P> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            guard: self.guard.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InquiryListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<String>,
}

pub fn inquiries_router<U, I, P>(state: InquiriesState<U, I, P>) -> Router
where
    U: UserRepository + 'static,
    I: InquiryRepository + 'static,
    P: PropertyRepository + 'static,
{
    Router::new()
        .route("/api/inquiries", post(create_handler::<U, I, P>))
        .route("/api/inquiries/received", get(received_handler::<U, I, P>))
        .route("/api/inquiries/sent", get(sent_handler::<U, I, P>))
        .route("/api/inquiries/:id/respond", put(respond_handler::<U, I, P>))
        .with_state(state)
}

pub(crate) async fn create_handler<U, I, P>(
    State(state): State<InquiriesState<U, I, P>>,
    headers: HeaderMap,
    Json(request): Json<NewInquiry>,
) -> Result<Response, ApiError>
where
    U: UserRepository + 'static,
    I: InquiryRepository + 'static,
    P: PropertyRepository + 'static,
{
    let user = state.guard.authenticate(&headers)?;
    validate::new_inquiry(&request)?;
    let inquiry = state.service.create(&user, request)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Inquiry sent successfully",
            "data": inquiry,
        })),
    )
        .into_response())
}

pub(crate) async fn received_handler<U, I, P>(
    State(state): State<InquiriesState<U, I, P>>,
    headers: HeaderMap,
    Query(query): Query<InquiryListQuery>,
) -> Result<Response, ApiError>
where
    U: UserRepository + 'static,
    I: InquiryRepository + 'static,
    P: PropertyRepository + 'static,
{
    let user = state.guard.authenticate(&headers)?;
    let status = parse_status_filter(query.status.as_deref())?;
    let spec = PageSpec::new(query.page, query.limit, ADMIN_PAGE_LIMIT);
    let page = state.service.received(&user.id, status, &spec)?;

    Ok(Json(json!({
        "success": true,
        "count": page.items.len(),
        "total": page.total,
        "pagination": page.pagination,
        "data": page.items,
    }))
    .into_response())
}

pub(crate) async fn sent_handler<U, I, P>(
    State(state): State<InquiriesState<U, I, P>>,
    headers: HeaderMap,
    Query(query): Query<InquiryListQuery>,
) -> Result<Response, ApiError>
where
    U: UserRepository + 'static,
    I: InquiryRepository + 'static,
    P: PropertyRepository + 'static,
{
    let user = state.guard.authenticate(&headers)?;
    let spec = PageSpec::new(query.page, query.limit, ADMIN_PAGE_LIMIT);
    let page = state.service.sent(&user.id, &spec)?;

    Ok(Json(json!({
        "success": true,
        "count": page.items.len(),
        "total": page.total,
        "pagination": page.pagination,
        "data": page.items,
    }))
    .into_response())
}

pub(crate) async fn respond_handler<U, I, P>(
    State(state): State<InquiriesState<U, I, P>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(reply): Json<InquiryReply>,
) -> Result<Response, ApiError>
where
    U: UserRepository + 'static,
    I: InquiryRepository + 'static,
    P: PropertyRepository + 'static,
{
    let user = state.guard.authenticate(&headers)?;
    validate::inquiry_reply(&reply)?;
    let inquiry = state
        .service
        .respond(&user.id, &InquiryId(id), &reply.message)?;

    Ok(Json(json!({
        "success": true,
        "message": "Inquiry updated successfully",
        "data": inquiry,
    }))
    .into_response())
}

fn parse_status_filter(raw: Option<&str>) -> Result<Option<InquiryStatus>, ApiError> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => InquiryStatus::parse(value).map(Some).ok_or_else(|| {
            ApiError::Validation(vec![FieldError {
                field: "status",
                message: "Invalid inquiry status",
            }])
        }),
        None => Ok(None),
    }
}
