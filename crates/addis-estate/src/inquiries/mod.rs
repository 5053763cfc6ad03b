//! The inquiry store: buyer-to-owner messages with denormalized owner and
//! contact snapshots taken at creation time.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ContactSnapshot, Inquiry, InquiryId, InquiryReply, InquiryResponse, InquiryStatus,
    InquiryView, NewInquiry, Priority, PropertySummary,
};
pub use repository::InquiryRepository;
pub use router::{inquiries_router, InquiriesState, InquiryListQuery};
pub use service::{InquiryError, InquiryService};
