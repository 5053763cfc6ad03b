use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::accounts::UserId;
use crate::listings::{Currency, PropertyId};

/// Identifier wrapper for inquiries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InquiryId(pub Uuid);

impl InquiryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InquiryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InquiryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    Pending,
    Responded,
    Closed,
}

impl InquiryStatus {
    pub const fn label(self) -> &'static str {
        match self {
            InquiryStatus::Pending => "pending",
            InquiryStatus::Responded => "responded",
            InquiryStatus::Closed => "closed",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(InquiryStatus::Pending),
            "responded" => Some(InquiryStatus::Responded),
            "closed" => Some(InquiryStatus::Closed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

/// Sender contact captured at creation time so the owner can reply without
/// another identity lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSnapshot {
    pub email: String,
    pub phone: String,
}

/// The owner's reply, recorded once the inquiry has been responded to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryResponse {
    pub message: String,
    pub responded_at: DateTime<Utc>,
    pub responded_by: UserId,
}

/// A buyer-to-owner message tied to a listing. `property_owner` and
/// `inquirer_contact` are intentional denormalizations: they are snapshots
/// from creation time, not live references.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: InquiryId,
    pub property: PropertyId,
    pub inquirer: UserId,
    pub property_owner: UserId,
    pub subject: String,
    pub message: String,
    pub inquirer_contact: ContactSnapshot,
    pub status: InquiryStatus,
    pub response: Option<InquiryResponse>,
    pub is_read: bool,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInquiry {
    pub property: PropertyId,
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub priority: Option<Priority>,
}

/// Reply payload for the owner's respond action.
#[derive(Debug, Clone, Deserialize)]
pub struct InquiryReply {
    pub message: String,
}

/// Summary of the listing an inquiry refers to, populated into list views.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySummary {
    pub title: String,
    pub price: u64,
    pub currency: Currency,
}

/// An inquiry plus the populated listing summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryView {
    #[serde(flatten)]
    pub inquiry: Inquiry,
    pub property_summary: Option<PropertySummary>,
}
