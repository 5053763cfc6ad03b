use super::domain::{Role, User, UserId};
use crate::pagination::{Page, PageSpec};
use crate::store::StoreError;

/// Storage abstraction for the identity store so services and the guard can
/// be exercised against in-memory fakes.
pub trait UserRepository: Send + Sync {
    /// Persist a new user. `Conflict` when the email or phone is taken.
    fn insert(&self, user: User) -> Result<User, StoreError>;
    /// Replace an existing record. `NotFound` when the id is unknown.
    fn update(&self, user: User) -> Result<(), StoreError>;
    fn fetch(&self, id: &UserId) -> Result<Option<User>, StoreError>;
    fn fetch_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    /// Remove a record. `NotFound` when the id is unknown.
    fn delete(&self, id: &UserId) -> Result<(), StoreError>;
    /// Admin listing, newest first.
    fn list(&self, filter: &UserFilter, page: &PageSpec) -> Result<Page<User>, StoreError>;
    fn count(&self, filter: &UserFilter) -> Result<u64, StoreError>;
}

/// Admin-view filter over the identity store.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserFilter {
    pub role: Option<Role>,
    pub approved: Option<bool>,
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        if let Some(role) = self.role {
            if user.role != role {
                return false;
            }
        }
        if let Some(approved) = self.approved {
            if user.is_approved != approved {
                return false;
            }
        }
        true
    }
}
