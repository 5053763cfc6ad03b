use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use super::domain::UserView;
use super::repository::UserRepository;
use super::service::{AccountService, LoginRequest, RegisterRequest};
use crate::auth::AuthGuard;
use crate::error::ApiError;
use crate::validate;

/// Shared state for the auth endpoints.
pub struct AccountsState<U> {
    pub service: Arc<AccountService<U>>,
    pub guard: Arc<AuthGuard<U>>,
}

impl<U> Clone for AccountsState<U> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            guard: self.guard.clone(),
        }
    }
}

pub fn accounts_router<U>(state: AccountsState<U>) -> Router
where
    U: UserRepository + 'static,
{
    Router::new()
        .route("/api/auth/register", post(register_handler::<U>))
        .route("/api/auth/login", post(login_handler::<U>))
        .route("/api/auth/me", get(me_handler::<U>))
        .with_state(state)
}

pub(crate) async fn register_handler<U>(
    State(state): State<AccountsState<U>>,
    Json(request): Json<RegisterRequest>,
) -> Result<Response, ApiError>
where
    U: UserRepository + 'static,
{
    validate::registration(&request)?;
    let session = state.service.register(request)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "User registered successfully",
            "token": session.token,
            "user": session.user,
        })),
    )
        .into_response())
}

pub(crate) async fn login_handler<U>(
    State(state): State<AccountsState<U>>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, ApiError>
where
    U: UserRepository + 'static,
{
    validate::login(&request)?;
    let session = state.service.login(request)?;

    Ok(Json(json!({
        "success": true,
        "message": "Login successful",
        "token": session.token,
        "user": session.user,
    }))
    .into_response())
}

pub(crate) async fn me_handler<U>(
    State(state): State<AccountsState<U>>,
    headers: HeaderMap,
) -> Result<Response, ApiError>
where
    U: UserRepository + 'static,
{
    let user = state.guard.authenticate(&headers)?;

    Ok(Json(json!({
        "success": true,
        "user": UserView::from(&user),
    }))
    .into_response())
}
