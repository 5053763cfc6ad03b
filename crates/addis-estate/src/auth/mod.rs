//! Bearer-credential authentication and the role/approval checks that gate
//! every protected route. Handlers run the stages in a fixed order:
//! authenticate, then authorize, then require_approved — a request that fails
//! an earlier stage never reaches a later one.

mod guard;
mod password;
mod token;


pub use guard::{bearer_token, AuthGuard};
pub use password::{hash_password, verify_password};
pub use token::TokenAuthority;

use crate::accounts::Role;
use crate::store::StoreError;

/// Everything that can go wrong between a raw `Authorization` header and an
/// authorized principal.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Not authorized, no token provided")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired, please log in again")]
    ExpiredToken,
    #[error("User not found")]
    UserNotFound,
    #[error("User role {} is not authorized to access this route", .role.label())]
    Forbidden { role: Role },
    #[error("Account approval required")]
    ApprovalRequired,
    #[error("token signing failed")]
    Signing,
    #[error("credential hashing failed")]
    Hashing,
    #[error(transparent)]
    Store(#[from] StoreError),
}
