use std::sync::Arc;

use chrono::Utc;

use super::domain::{
    ImageAttachment, ImageUpload, ListingPatch, ListingStatus, ListingView, NewListing,
    OwnerContact, Property, PropertyId,
};
use super::query::{ListingFilter, SortOrder};
use super::repository::PropertyRepository;
use crate::accounts::{User, UserId, UserRepository};
use crate::pagination::{Page, PageSpec};
use crate::store::StoreError;

/// Per-request ceiling on attached images.
pub const MAX_IMAGES_PER_UPLOAD: usize = 10;
/// Per-file ceiling, matching the upload middleware's own limit.
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Listing lifecycle: creation into the moderation queue, owner-only edits,
/// and the public read path with its view counter.
pub struct ListingService<P, U> {
    properties: Arc<P>,
    users: Arc<U>,
}

impl<P, U> ListingService<P, U>
where
    P: PropertyRepository,
    U: UserRepository,
{
    pub fn new(properties: Arc<P>, users: Arc<U>) -> Self {
        Self { properties, users }
    }

    /// Persist a new listing for an approved listing-role owner. The guard
    /// has already checked role and approval; every listing starts pending
    /// regardless of input.
    pub fn create(&self, owner: &User, draft: NewListing) -> Result<Property, ListingError> {
        let now = Utc::now();
        let property = Property {
            id: PropertyId::new(),
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            category: draft.category,
            kind: draft.kind,
            price: draft.price,
            currency: draft.currency,
            area: draft.area,
            location: draft.location,
            features: draft.features,
            images: Vec::new(),
            owner: owner.id,
            status: ListingStatus::Pending,
            is_active: true,
            views: 0,
            approved_by: None,
            approved_at: None,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
        };

        Ok(self.properties.insert(property)?)
    }

    /// Owner-only edit. Ownership is checked against the id, not the role;
    /// moderation state does not block owner edits. Status may only close an
    /// approved listing out as sold or rented.
    pub fn update(
        &self,
        user: &UserId,
        id: &PropertyId,
        patch: ListingPatch,
    ) -> Result<Property, ListingError> {
        let mut property = self.owned_listing(user, id)?;

        if let Some(status) = patch.status {
            let closing = matches!(status, ListingStatus::Sold | ListingStatus::Rented);
            if !closing || property.status != ListingStatus::Approved {
                return Err(ListingError::InvalidStatusChange);
            }
            property.status = status;
        }

        if let Some(title) = patch.title {
            property.title = title.trim().to_string();
        }
        if let Some(description) = patch.description {
            property.description = description.trim().to_string();
        }
        if let Some(category) = patch.category {
            property.category = category;
        }
        if let Some(kind) = patch.kind {
            property.kind = kind;
        }
        if let Some(price) = patch.price {
            property.price = price;
        }
        if let Some(currency) = patch.currency {
            property.currency = currency;
        }
        if let Some(area) = patch.area {
            property.area = area;
        }
        if let Some(location) = patch.location {
            property.location = location;
        }
        if let Some(features) = patch.features {
            property.features = features;
        }
        if let Some(is_active) = patch.is_active {
            property.is_active = is_active;
        }
        property.updated_at = Utc::now();

        self.properties.update(property.clone())?;
        Ok(property)
    }

    pub fn delete(&self, user: &UserId, id: &PropertyId) -> Result<(), ListingError> {
        let property = self.owned_listing(user, id)?;
        Ok(self.properties.delete(&property.id)?)
    }

    /// Public single-listing read. Hidden listings are indistinguishable
    /// from missing ones, and every successful fetch counts one view.
    pub fn public_listing(&self, id: &PropertyId) -> Result<ListingView, ListingError> {
        let mut property = self
            .properties
            .fetch(id)?
            .filter(Property::is_publicly_visible)
            .ok_or(ListingError::NotFound)?;

        property.views += 1;
        self.properties.update(property.clone())?;

        Ok(self.view(property))
    }

    /// Public search; the caller builds the envelope with
    /// [`ListingFilter::public`] so the visibility constraint is always set.
    pub fn search(
        &self,
        filter: &ListingFilter,
        sort: SortOrder,
        page: &PageSpec,
    ) -> Result<Page<ListingView>, ListingError> {
        let results = self.properties.search(filter, sort, page)?;
        Ok(results.map(|property| self.view(property)))
    }

    /// Everything the owner has listed, any moderation state, newest first.
    pub fn my_listings(&self, owner: &UserId) -> Result<Vec<Property>, ListingError> {
        Ok(self.properties.list_by_owner(owner)?)
    }

    /// Record already-persisted image files against an owned listing,
    /// enforcing the upload contract: at most ten files, image content
    /// types only, five megabytes each.
    pub fn attach_images(
        &self,
        user: &UserId,
        id: &PropertyId,
        uploads: Vec<ImageUpload>,
    ) -> Result<Property, ListingError> {
        if uploads.is_empty() {
            return Err(ListingError::NoImages);
        }
        if uploads.len() > MAX_IMAGES_PER_UPLOAD {
            return Err(ListingError::TooManyImages);
        }
        for upload in &uploads {
            if !upload.content_type.starts_with("image/") {
                return Err(ListingError::UnsupportedImageType(
                    upload.content_type.clone(),
                ));
            }
            if upload.size_bytes > MAX_IMAGE_BYTES {
                return Err(ListingError::ImageTooLarge(upload.filename.clone()));
            }
        }

        let mut property = self.owned_listing(user, id)?;
        property.images.extend(uploads.into_iter().map(|upload| {
            ImageAttachment {
                filename: upload.filename,
                caption: upload.caption,
                is_primary: upload.is_primary,
            }
        }));
        property.updated_at = Utc::now();

        self.properties.update(property.clone())?;
        Ok(property)
    }

    pub(crate) fn view(&self, property: Property) -> ListingView {
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
    }

    fn owned_listing(&self, user: &UserId, id: &PropertyId) -> Result<Property, ListingError> {
        let property = self.properties.fetch(id)?.ok_or(ListingError::NotFound)?;
        if property.owner != *user {
            return Err(ListingError::NotOwner);
        }
        Ok(property)
    }
}

/// Error raised by the listing service.
#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    #[error("Property not found")]
    NotFound,
    #[error("Not authorized to modify this property")]
    NotOwner,
    #[error("No file uploaded")]
    NoImages,
    #[error("At most 10 images can be uploaded at once")]
    TooManyImages,
    #[error("Only image files are allowed, got {0}")]
    UnsupportedImageType(String),
    #[error("File size exceeds maximum limit: {0}")]
    ImageTooLarge(String),
    #[error("Invalid property status")]
    InvalidStatusChange,
    #[error(transparent)]
    Store(#[from] StoreError),
}
