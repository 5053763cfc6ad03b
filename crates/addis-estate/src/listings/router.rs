use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use uuid::Uuid;

use super::domain::{ImageUpload, ListingPatch, NewListing, PropertyId};
use super::query::{ListingFilter, ListingQuery};
use super::repository::PropertyRepository;
use super::service::ListingService;
use crate::accounts::{Role, UserRepository};
use crate::auth::AuthGuard;
use crate::error::ApiError;
use crate::validate;

/// Roles allowed to create listings; the approval gate applies on top.
const LISTING_ROLES: [Role; 3] = [Role::Seller, Role::Landlord, Role::Agent];

/// Shared state for the listing endpoints.
pub struct ListingsState<U, P> {
    pub service: Arc<ListingService<P, U>>,
    pub guard: Arc<AuthGuard<U>>,
}

impl<U, P> Clone for ListingsState<U, P> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            guard: self.guard.clone(),
        }
    }
}

pub fn listings_router<U, P>(state: ListingsState<U, P>) -> Router
where
    U: UserRepository + 'static,
    P: PropertyRepository + 'static,
{
    Router::new()
        .route(
            "/api/properties",
            get(search_handler::<U, P>).post(create_handler::<U, P>),
        )
        .route("/api/properties/my/listings", get(my_listings_handler::<U, P>))
        .route(
            "/api/properties/:id",
            get(public_listing_handler::<U, P>)
                .put(update_handler::<U, P>)
                .delete(delete_handler::<U, P>),
        )
        .route("/api/properties/:id/images", post(images_handler::<U, P>))
        .with_state(state)
}

pub(crate) async fn search_handler<U, P>(
    State(state): State<ListingsState<U, P>>,
    Query(query): Query<ListingQuery>,
) -> Result<Response, ApiError>
where
    U: UserRepository + 'static,
    P: PropertyRepository + 'static,
{
    let (filter, sort, spec) = ListingFilter::public(&query)?;
    let page = state.service.search(&filter, sort, &spec)?;

    Ok(Json(json!({
        "success": true,
        "count": page.items.len(),
        "total": page.total,
        "pagination": page.pagination,
        "data": page.items,
    }))
    .into_response())
}

pub(crate) async fn public_listing_handler<U, P>(
    State(state): State<ListingsState<U, P>>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError>
where
    U: UserRepository + 'static,
    P: PropertyRepository + 'static,
{
    let view = state.service.public_listing(&PropertyId(id))?;

    Ok(Json(json!({
        "success": true,
        "data": view,
    }))
    .into_response())
}

pub(crate) async fn create_handler<U, P>(
    State(state): State<ListingsState<U, P>>,
    headers: HeaderMap,
    Json(draft): Json<NewListing>,
) -> Result<Response, ApiError>
where
    U: UserRepository + 'static,
    P: PropertyRepository + 'static,
{
    let user = state.guard.authenticate(&headers)?;
    state.guard.authorize(&user, &LISTING_ROLES)?;
    state.guard.require_approved(&user)?;
    validate::new_listing(&draft)?;

    let property = state.service.create(&user, draft)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Property created successfully and pending approval",
            "data": property,
        })),
    )
        .into_response())
}

pub(crate) async fn update_handler<U, P>(
    State(state): State<ListingsState<U, P>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(patch): Json<ListingPatch>,
) -> Result<Response, ApiError>
where
    U: UserRepository + 'static,
    P: PropertyRepository + 'static,
{
    let user = state.guard.authenticate(&headers)?;
    validate::listing_patch(&patch)?;
    let property = state.service.update(&user.id, &PropertyId(id), patch)?;

    Ok(Json(json!({
        "success": true,
        "message": "Property updated successfully",
        "data": property,
    }))
    .into_response())
}

pub(crate) async fn delete_handler<U, P>(
    State(state): State<ListingsState<U, P>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError>
where
    U: UserRepository + 'static,
    P: PropertyRepository + 'static,
{
    let user = state.guard.authenticate(&headers)?;
    state.service.delete(&user.id, &PropertyId(id))?;

    Ok(Json(json!({
        "success": true,
        "message": "Property deleted successfully",
    }))
    .into_response())
}

pub(crate) async fn my_listings_handler<U, P>(
    State(state): State<ListingsState<U, P>>,
    headers: HeaderMap,
) -> Result<Response, ApiError>
where
    U: UserRepository + 'static,
    P: PropertyRepository + 'static,
{
    let user = state.guard.authenticate(&headers)?;
    let listings = state.service.my_listings(&user.id)?;

    Ok(Json(json!({
        "success": true,
        "count": listings.len(),
        "data": listings,
    }))
    .into_response())
}

pub(crate) async fn images_handler<U, P>(
    State(state): State<ListingsState<U, P>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(uploads): Json<Vec<ImageUpload>>,
) -> Result<Response, ApiError>
where
    U: UserRepository + 'static,
    P: PropertyRepository + 'static,
{
    let user = state.guard.authenticate(&headers)?;
    let property = state
        .service
        .attach_images(&user.id, &PropertyId(id), uploads)?;

    Ok(Json(json!({
        "success": true,
        "message": "Images uploaded successfully",
        "data": property,
    }))
    .into_response())
}
