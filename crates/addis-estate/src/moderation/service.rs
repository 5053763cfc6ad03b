use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::accounts::{Role, User, UserFilter, UserId, UserRepository, UserView};
use crate::inquiries::{InquiryRepository, InquiryStatus};
use crate::listings::{
    ListingFilter, ListingStatus, ListingView, OwnerContact, Property, PropertyId,
    PropertyRepository, SortOrder,
};
use crate::pagination::{Page, PageSpec};
use crate::store::StoreError;

/// Reason recorded when an admin rejects a listing without giving one.
pub const DEFAULT_REJECTION_REASON: &str = "Does not meet marketplace listing requirements";

/// Aggregate counts surfaced on the admin dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub users: UserCounts,
    pub properties: ListingCounts,
    pub inquiries: InquiryCounts,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCounts {
    pub total: u64,
    pub pending_approval: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingCounts {
    pub total: u64,
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryCounts {
    pub total: u64,
    pub pending: u64,
}

/// The moderation workflow: the only place user approval flags and listing
/// moderation status change hands. Role enforcement (admin-only) happens
/// upstream in the guard; this service owns the transitions themselves.
pub struct ModerationService<U, P, I> {
    users: Arc<U>,
    properties: Arc<P>,
    inquiries: Arc<I>,
}

impl<U, P, I> ModerationService<U, P, I>
where
    U: UserRepository,
    P: PropertyRepository,
    I: InquiryRepository,
{
    pub fn new(users: Arc<U>, properties: Arc<P>, inquiries: Arc<I>) -> Self {
        Self {
            users,
            properties,
            inquiries,
        }
    }

    /// pending → approved. Idempotent: approving an already-approved listing
    /// re-stamps the approver and timestamp rather than erroring. Any prior
    /// rejection reason is cleared so the stamps only ever describe the
    /// current state.
    pub fn approve_property(
        &self,
        admin: &UserId,
        id: &PropertyId,
    ) -> Result<Property, ModerationError> {
        let mut property = self
            .properties
            .fetch(id)?
            .ok_or(ModerationError::PropertyNotFound)?;

        property.status = ListingStatus::Approved;
        property.approved_by = Some(*admin);
        property.approved_at = Some(Utc::now());
        property.rejection_reason = None;
        property.updated_at = Utc::now();

        self.properties.update(property.clone())?;
        Ok(property)
    }

    /// pending → rejected, with a recorded reason. Approval stamps are
    /// cleared for the same reason rejection reasons are on approval.
    pub fn reject_property(
        &self,
        id: &PropertyId,
        reason: Option<String>,
    ) -> Result<Property, ModerationError> {
        let mut property = self
            .properties
            .fetch(id)?
            .ok_or(ModerationError::PropertyNotFound)?;

        property.status = ListingStatus::Rejected;
        property.rejection_reason = Some(
            reason
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
                .unwrap_or_else(|| DEFAULT_REJECTION_REASON.to_string()),
        );
        property.approved_by = None;
        property.approved_at = None;
        property.updated_at = Utc::now();

        self.properties.update(property.clone())?;
        Ok(property)
    }

    /// Account approval: sets both flags, and may be repeated harmlessly.
    pub fn approve_user(&self, id: &UserId) -> Result<User, ModerationError> {
        let mut user = self.users.fetch(id)?.ok_or(ModerationError::UserNotFound)?;

        user.is_approved = true;
        user.is_verified = true;
        user.updated_at = Utc::now();

        self.users.update(user.clone())?;
        Ok(user)
    }

    /// Reverse transition: an admin can pull approval at any time.
    pub fn reject_user(&self, id: &UserId) -> Result<User, ModerationError> {
        let mut user = self.users.fetch(id)?.ok_or(ModerationError::UserNotFound)?;

        user.is_approved = false;
        user.updated_at = Utc::now();

        self.users.update(user.clone())?;
        Ok(user)
    }

    /// Admin accounts can never be deleted through this path; the check runs
    /// before any write so a forbidden call leaves the store untouched.
    pub fn delete_user(&self, id: &UserId) -> Result<(), ModerationError> {
        let user = self.users.fetch(id)?.ok_or(ModerationError::UserNotFound)?;

        if user.role == Role::Admin {
            return Err(ModerationError::AdminUndeletable);
        }

        Ok(self.users.delete(&user.id)?)
    }

    pub fn dashboard(&self) -> Result<DashboardSummary, ModerationError> {
        let users_total = self.users.count(&UserFilter::default())?;
        let users_pending = self.users.count(&UserFilter {
            role: None,
            approved: Some(false),
        })?;

        let properties_total = self.properties.count_by_status(None)?;
        let pending = self
            .properties
            .count_by_status(Some(ListingStatus::Pending))?;
        let approved = self
            .properties
            .count_by_status(Some(ListingStatus::Approved))?;
        let rejected = self
            .properties
            .count_by_status(Some(ListingStatus::Rejected))?;

        let inquiries_total = self.inquiries.count(None)?;
        let inquiries_pending = self.inquiries.count(Some(InquiryStatus::Pending))?;

        Ok(DashboardSummary {
            users: UserCounts {
                total: users_total,
                pending_approval: users_pending,
            },
            properties: ListingCounts {
                total: properties_total,
                pending,
                approved,
                rejected,
            },
            inquiries: InquiryCounts {
                total: inquiries_total,
                pending: inquiries_pending,
            },
        })
    }

    pub fn list_users(
        &self,
        filter: &UserFilter,
        page: &PageSpec,
    ) -> Result<Page<UserView>, ModerationError> {
        let results = self.users.list(filter, page)?;
        Ok(results.map(|user| UserView::from(&user)))
    }

    /// Admin listing search: all statuses unless the filter pins one, owner
    /// contact populated for the review queue.
    pub fn list_properties(
        &self,
        filter: &ListingFilter,
        sort: SortOrder,
        page: &PageSpec,
    ) -> Result<Page<ListingView>, ModerationError> {
        let results = self.properties.search(filter, sort, page)?;
        Ok(results.map(|property| {
            let owner_contact = self
                .users
                .fetch(&property.owner)
                .ok()
                .flatten()
                .map(|owner| OwnerContact {
                    first_name: owner.first_name,
                    last_name: owner.last_name,
                    email: owner.email,
                    phone: owner.phone,
                });
            ListingView {
                listing: property,
                owner_contact,
            }
        }))
    }
}

/// Error raised by the moderation workflow. Every failure is terminal and
/// user-visible; nothing is retried or swallowed.
#[derive(Debug, thiserror::Error)]
pub enum ModerationError {
    #[error("User not found")]
    UserNotFound,
    #[error("Property not found")]
    PropertyNotFound,
    #[error("Admin accounts cannot be deleted")]
    AdminUndeletable,
    #[error(transparent)]
    Store(#[from] StoreError),
}
