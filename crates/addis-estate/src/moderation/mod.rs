//! The moderation workflow: admin-gated transitions over user approval and
//! listing status, plus the dashboard and review-queue views.

pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use router::{admin_router, AdminState, RejectionBody, UserListQuery};
pub use service::{
    DashboardSummary, InquiryCounts, ListingCounts, ModerationError, ModerationService,
    UserCounts, DEFAULT_REJECTION_REASON,
};
