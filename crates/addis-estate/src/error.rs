use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::accounts::AccountError;
use crate::auth::AuthError;
use crate::config::ConfigError;
use crate::inquiries::InquiryError;
use crate::listings::ListingError;
use crate::moderation::ModerationError;
use crate::store::StoreError;
use crate::telemetry::TelemetryError;
use crate::validate::FieldError;

/// Request-level error boundary. Every domain error converts into this, and
/// `IntoResponse` turns it into the uniform `{success: false, message}`
/// envelope. Store failures and other unexpected conditions become a generic
/// 500 — internals are logged, never sent to the client.
#[derive(Debug)]
pub enum ApiError {
    Validation(Vec<FieldError>),
    Auth(AuthError),
    Account(AccountError),
    Listing(ListingError),
    Inquiry(InquiryError),
    Moderation(ModerationError),
    Store(StoreError),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(_) => write!(f, "Validation errors"),
            ApiError::Auth(err) => err.fmt(f),
            ApiError::Account(err) => err.fmt(f),
            ApiError::Listing(err) => err.fmt(f),
            ApiError::Inquiry(err) => err.fmt(f),
            ApiError::Moderation(err) => err.fmt(f),
            ApiError::Store(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Validation(_) => None,
            ApiError::Auth(err) => Some(err),
            ApiError::Account(err) => Some(err),
            ApiError::Listing(err) => Some(err),
            ApiError::Inquiry(err) => Some(err),
            ApiError::Moderation(err) => Some(err),
            ApiError::Store(err) => Some(err),
        }
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Auth(err) => match err {
                AuthError::MissingToken
                | AuthError::InvalidToken
                | AuthError::ExpiredToken
                | AuthError::UserNotFound => StatusCode::UNAUTHORIZED,
                AuthError::Forbidden { .. } | AuthError::ApprovalRequired => {
                    StatusCode::FORBIDDEN
                }
                AuthError::Signing | AuthError::Hashing | AuthError::Store(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::Account(err) => match err {
                AccountError::DuplicateIdentity => StatusCode::BAD_REQUEST,
                AccountError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AccountError::NotFound => StatusCode::NOT_FOUND,
                AccountError::Auth(_) | AccountError::Store(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::Listing(err) => match err {
                ListingError::NotFound => StatusCode::NOT_FOUND,
                ListingError::NotOwner => StatusCode::FORBIDDEN,
                ListingError::NoImages
                | ListingError::TooManyImages
                | ListingError::UnsupportedImageType(_)
                | ListingError::ImageTooLarge(_)
                | ListingError::InvalidStatusChange => StatusCode::BAD_REQUEST,
                ListingError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Inquiry(err) => match err {
                InquiryError::PropertyNotFound | InquiryError::NotFound => StatusCode::NOT_FOUND,
                InquiryError::OwnProperty => StatusCode::BAD_REQUEST,
                InquiryError::NotResponder => StatusCode::FORBIDDEN,
                InquiryError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Moderation(err) => match err {
                ModerationError::UserNotFound | ModerationError::PropertyNotFound => {
                    StatusCode::NOT_FOUND
                }
                ModerationError::AdminUndeletable => StatusCode::FORBIDDEN,
                ModerationError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Store(err) => match err {
                StoreError::NotFound => StatusCode::NOT_FOUND,
                StoreError::Conflict => StatusCode::BAD_REQUEST,
                StoreError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
            let body = Json(json!({
                "success": false,
                "message": "Server error",
            }));
            return (status, body).into_response();
        }

        let body = match &self {
            ApiError::Validation(errors) => Json(json!({
                "success": false,
                "message": "Validation errors",
                "errors": errors,
            })),
            other => Json(json!({
                "success": false,
                "message": other.to_string(),
            })),
        };

        (status, body).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(value: AuthError) -> Self {
        Self::Auth(value)
    }
}

impl From<AccountError> for ApiError {
    fn from(value: AccountError) -> Self {
        Self::Account(value)
    }
}

impl From<ListingError> for ApiError {
    fn from(value: ListingError) -> Self {
        Self::Listing(value)
    }
}

impl From<InquiryError> for ApiError {
    fn from(value: InquiryError) -> Self {
        Self::Inquiry(value)
    }
}

impl From<ModerationError> for ApiError {
    fn from(value: ModerationError) -> Self {
        Self::Moderation(value)
    }
}

impl From<StoreError> for ApiError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Process-level error for service startup and the CLI.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Api(ApiError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Api(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Api(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<ApiError> for AppError {
    fn from(value: ApiError) -> Self {
        Self::Api(value)
    }
}
