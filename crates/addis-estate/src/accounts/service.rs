use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::domain::{Address, Role, User, UserId, UserView};
use super::repository::UserRepository;
use crate::auth::{hash_password, verify_password, AuthError, TokenAuthority};
use crate::store::StoreError;

/// Registration payload. Role defaults to buyer; admin registration is
/// rejected upstream by validation, so admin accounts only come from seeding.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub address: Option<Address>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Issued credential plus the sanitized account it belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub token: String,
    pub user: UserView,
}

/// Registration, login, and profile reads over the identity store.
pub struct AccountService<U> {
    users: Arc<U>,
    tokens: Arc<TokenAuthority>,
}

impl<U> AccountService<U>
where
    U: UserRepository,
{
    pub fn new(users: Arc<U>, tokens: Arc<TokenAuthority>) -> Self {
        Self { users, tokens }
    }

    /// Create an account. Approval is computed from the role at this single
    /// point: buyers and admins start approved, listing roles start pending.
    pub fn register(&self, request: RegisterRequest) -> Result<AuthSession, AccountError> {
        let role = request.role.unwrap_or(Role::Buyer);
        let password_hash = hash_password(&request.password)?;
        let now = Utc::now();

        let user = User {
            id: UserId::new(),
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            email: normalize_email(&request.email),
            phone: request.phone.trim().to_string(),
            password_hash,
            role,
            is_verified: false,
            is_approved: role.approved_on_registration(),
            profile_image: None,
            address: request.address.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };

        let stored = self.users.insert(user).map_err(|err| match err {
            StoreError::Conflict => AccountError::DuplicateIdentity,
            other => AccountError::Store(other),
        })?;

        self.session_for(&stored)
    }

    /// Verify credentials and mint a session. Unknown email and wrong
    /// password are indistinguishable to the caller.
    pub fn login(&self, request: LoginRequest) -> Result<AuthSession, AccountError> {
        let user = self
            .users
            .fetch_by_email(&normalize_email(&request.email))?
            .ok_or(AccountError::InvalidCredentials)?;

        if !verify_password(&request.password, &user.password_hash) {
            return Err(AccountError::InvalidCredentials);
        }

        self.session_for(&user)
    }

    pub fn current_user(&self, id: &UserId) -> Result<UserView, AccountError> {
        let user = self.users.fetch(id)?.ok_or(AccountError::NotFound)?;
        Ok(UserView::from(&user))
    }

    /// Idempotent bootstrap: create the configured admin account unless one
    /// already exists for the email. Returns the view and whether a record
    /// was created.
    pub fn seed_admin(
        &self,
        email: &str,
        phone: &str,
        password: &str,
    ) -> Result<(UserView, bool), AccountError> {
        let email = normalize_email(email);
        if let Some(existing) = self.users.fetch_by_email(&email)? {
            return Ok((UserView::from(&existing), false));
        }

        let now = Utc::now();
        let admin = User {
            id: UserId::new(),
            first_name: "Admin".to_string(),
            last_name: "User".to_string(),
            email,
            phone: phone.trim().to_string(),
            password_hash: hash_password(password)?,
            role: Role::Admin,
            is_verified: true,
            is_approved: true,
            profile_image: None,
            address: Address::default(),
            created_at: now,
            updated_at: now,
        };

        let stored = self.users.insert(admin)?;
        Ok((UserView::from(&stored), true))
    }

    fn session_for(&self, user: &User) -> Result<AuthSession, AccountError> {
        let token = self.tokens.issue(user.id)?;
        Ok(AuthSession {
            token,
            user: UserView::from(user),
        })
    }
}

fn normalize_email(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

/// Error raised by the account service.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("User already exists with this email or phone number")]
    DuplicateIdentity,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("User not found")]
    NotFound,
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
