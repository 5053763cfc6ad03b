use std::sync::Arc;

use axum::http::{header, HeaderMap};

use super::token::TokenAuthority;
use super::AuthError;
use crate::accounts::{Role, User, UserId, UserRepository};

/// Pull the bearer credential out of the `Authorization` header. The scheme
/// prefix is mandatory; an empty credential counts as missing.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingToken)
}

/// Resolves a request credential to a principal and enforces the role and
/// approval predicates. Read-only: the guard never mutates user state.
pub struct AuthGuard<U> {
    users: Arc<U>,
    tokens: Arc<TokenAuthority>,
}

impl<U> AuthGuard<U>
where
    U: UserRepository,
{
    pub fn new(users: Arc<U>, tokens: Arc<TokenAuthority>) -> Self {
        Self { users, tokens }
    }

    /// Verify the bearer credential and load the user it names. Runs before
    /// any role or approval check; deleted users fail here even when their
    /// token is still within its lifetime.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<User, AuthError> {
        let token = bearer_token(headers)?;
        let user_id = self.tokens.verify(token)?;
        self.users
            .fetch(&user_id)?
            .ok_or(AuthError::UserNotFound)
    }

    /// Pure predicate: the principal's role must be in the allowed set.
    pub fn authorize(&self, user: &User, allowed: &[Role]) -> Result<(), AuthError> {
        if allowed.contains(&user.role) {
            Ok(())
        } else {
            Err(AuthError::Forbidden { role: user.role })
        }
    }

    /// Listing roles must have been approved by an admin before they can
    /// transact; buyers and admins always pass.
    pub fn require_approved(&self, user: &User) -> Result<(), AuthError> {
        if user.role.needs_listing_approval() && !user.is_approved {
            Err(AuthError::ApprovalRequired)
        } else {
            Ok(())
        }
    }
}
