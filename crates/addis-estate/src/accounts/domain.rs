use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier wrapper for user records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Marketplace roles. Immutable after registration: no operation changes a
/// user's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Buyer,
    Seller,
    Landlord,
    Agent,
    Admin,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Role::Buyer => "buyer",
            Role::Seller => "seller",
            Role::Landlord => "landlord",
            Role::Agent => "agent",
            Role::Admin => "admin",
        }
    }

    /// Buyers and admins transact immediately; everyone else waits for an
    /// admin to approve the account.
    pub const fn approved_on_registration(self) -> bool {
        matches!(self, Role::Buyer | Role::Admin)
    }

    /// Roles that may create listings, and therefore the roles subject to
    /// the approval gate.
    pub const fn needs_listing_approval(self) -> bool {
        matches!(self, Role::Seller | Role::Landlord | Role::Agent)
    }
}

/// Optional structured address captured on the profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub city: Option<String>,
    pub subcity: Option<String>,
    pub woreda: Option<String>,
    pub kebele: Option<String>,
}

/// A registered account. The password hash never leaves the process: the
/// struct serializes without it and API payloads go through [`UserView`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub is_verified: bool,
    pub is_approved: bool,
    pub profile_image: Option<String>,
    pub address: Address,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Sanitized representation of a user for API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub is_verified: bool,
    pub is_approved: bool,
    pub profile_image: Option<String>,
    pub address: Address,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            role: user.role,
            is_verified: user.is_verified,
            is_approved: user.is_approved,
            profile_image: user.profile_image.clone(),
            address: user.address.clone(),
        }
    }
}
