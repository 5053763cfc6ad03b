//! The listing store and its lifecycle: sellers create into the moderation
//! queue, owners edit, the public reads what moderation has let through.

pub mod domain;
pub mod query;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Area, AreaUnit, Category, Coordinates, Currency, Features, ImageAttachment, ImageUpload,
    ListingPatch, ListingStatus, ListingView, Location, NewListing, OwnerContact, Property,
    PropertyId, PropertyKind,
};
pub use query::{ListingFilter, ListingQuery, SortOrder, ADMIN_PAGE_LIMIT, PUBLIC_PAGE_LIMIT};
pub use repository::PropertyRepository;
pub use router::{listings_router, ListingsState};
pub use service::{ListingError, ListingService, MAX_IMAGES_PER_UPLOAD, MAX_IMAGE_BYTES};
