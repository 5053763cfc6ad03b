use super::domain::{Inquiry, InquiryId, InquiryStatus};
use crate::accounts::UserId;
use crate::pagination::{Page, PageSpec};
use crate::store::StoreError;

/// Storage abstraction for the inquiry store. Both listings come back
/// newest first.
pub trait InquiryRepository: Send + Sync {
    fn insert(&self, inquiry: Inquiry) -> Result<Inquiry, StoreError>;
    /// Replace an existing record. `NotFound` when the id is unknown.
    fn update(&self, inquiry: Inquiry) -> Result<(), StoreError>;
    fn fetch(&self, id: &InquiryId) -> Result<Option<Inquiry>, StoreError>;
    /// Inquiries addressed to listings this user owns.
    fn list_received(
        &self,
        owner: &UserId,
        status: Option<InquiryStatus>,
        page: &PageSpec,
    ) -> Result<Page<Inquiry>, StoreError>;
    /// Inquiries this user has sent.
    fn list_sent(&self, inquirer: &UserId, page: &PageSpec) -> Result<Page<Inquiry>, StoreError>;
    fn count(&self, status: Option<InquiryStatus>) -> Result<u64, StoreError>;
}
