use super::domain::{ListingStatus, Property, PropertyId};
use super::query::{ListingFilter, SortOrder};
use crate::accounts::UserId;
use crate::pagination::{Page, PageSpec};
use crate::store::StoreError;

/// Storage abstraction for the listing store.
pub trait PropertyRepository: Send + Sync {
    fn insert(&self, property: Property) -> Result<Property, StoreError>;
    /// Replace an existing record. `NotFound` when the id is unknown.
    fn update(&self, property: Property) -> Result<(), StoreError>;
    fn fetch(&self, id: &PropertyId) -> Result<Option<Property>, StoreError>;
    fn delete(&self, id: &PropertyId) -> Result<(), StoreError>;
    /// Filtered, sorted, paginated search shared by the public surface and
    /// the admin view.
    fn search(
        &self,
        filter: &ListingFilter,
        sort: SortOrder,
        page: &PageSpec,
    ) -> Result<Page<Property>, StoreError>;
    /// Every listing belonging to one owner, newest first, any status.
    fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Property>, StoreError>;
    fn count_by_status(&self, status: Option<ListingStatus>) -> Result<u64, StoreError>;
}
