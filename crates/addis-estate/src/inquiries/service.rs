use std::sync::Arc;

use chrono::Utc;

use super::domain::{
    ContactSnapshot, Inquiry, InquiryId, InquiryResponse, InquiryStatus, InquiryView, NewInquiry,
    PropertySummary,
};
use super::repository::InquiryRepository;
use crate::accounts::{User, UserId};
use crate::listings::PropertyRepository;
use crate::pagination::{Page, PageSpec};
use crate::store::StoreError;

/// Buyer-to-owner messaging over listings.
pub struct InquiryService<I, P> {
    inquiries: Arc<I>,
    properties: Arc<P>,
}

impl<I, P> InquiryService<I, P>
where
    I: InquiryRepository,
    P: PropertyRepository,
{
    pub fn new(inquiries: Arc<I>, properties: Arc<P>) -> Self {
        Self {
            inquiries,
            properties,
        }
    }

    /// File an inquiry against a listing. The listing owner and the sender's
    /// contact details are snapshotted here; owners cannot inquire on their
    /// own listings.
    pub fn create(&self, sender: &User, request: NewInquiry) -> Result<Inquiry, InquiryError> {
        let property = self
            .properties
            .fetch(&request.property)?
            .ok_or(InquiryError::PropertyNotFound)?;

        if property.owner == sender.id {
            return Err(InquiryError::OwnProperty);
        }

        let now = Utc::now();
        let inquiry = Inquiry {
            id: InquiryId::new(),
            property: property.id,
            inquirer: sender.id,
            property_owner: property.owner,
            subject: request.subject.trim().to_string(),
            message: request.message.trim().to_string(),
            inquirer_contact: ContactSnapshot {
                email: sender.email.clone(),
                phone: sender.phone.clone(),
            },
            status: InquiryStatus::Pending,
            response: None,
            is_read: false,
            priority: request.priority.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };

        Ok(self.inquiries.insert(inquiry)?)
    }

    /// Record the owner's reply. Only the denormalized owner may respond; a
    /// repeat response overwrites the previous one and the status stays
    /// responded.
    pub fn respond(
        &self,
        responder: &UserId,
        id: &InquiryId,
        message: &str,
    ) -> Result<Inquiry, InquiryError> {
        let mut inquiry = self.inquiries.fetch(id)?.ok_or(InquiryError::NotFound)?;

        if inquiry.property_owner != *responder {
            return Err(InquiryError::NotResponder);
        }

        let now = Utc::now();
        inquiry.status = InquiryStatus::Responded;
        inquiry.response = Some(InquiryResponse {
            message: message.trim().to_string(),
            responded_at: now,
            responded_by: *responder,
        });
        inquiry.is_read = true;
        inquiry.updated_at = now;

        self.inquiries.update(inquiry.clone())?;
        Ok(inquiry)
    }

    pub fn received(
        &self,
        owner: &UserId,
        status: Option<InquiryStatus>,
        page: &PageSpec,
    ) -> Result<Page<InquiryView>, InquiryError> {
        let results = self.inquiries.list_received(owner, status, page)?;
        Ok(results.map(|inquiry| self.view(inquiry)))
    }

    pub fn sent(&self, inquirer: &UserId, page: &PageSpec) -> Result<Page<InquiryView>, InquiryError> {
        let results = self.inquiries.list_sent(inquirer, page)?;
        Ok(results.map(|inquiry| self.view(inquiry)))
    }

    fn view(&self, inquiry: Inquiry) -> InquiryView {
        let property_summary = self
            .properties
            .fetch(&inquiry.property)
            .ok()
            .flatten()
            .map(|property| PropertySummary {
                title: property.title,
                price: property.price,
                currency: property.currency,
            });

        InquiryView {
            inquiry,
            property_summary,
        }
    }
}

/// Error raised by the inquiry service.
#[derive(Debug, thiserror::Error)]
pub enum InquiryError {
    #[error("Property not found")]
    PropertyNotFound,
    #[error("You cannot inquire about your own property")]
    OwnProperty,
    #[error("Inquiry not found")]
    NotFound,
    #[error("Not authorized to respond to this inquiry")]
    NotResponder,
    #[error(transparent)]
    Store(#[from] StoreError),
}
