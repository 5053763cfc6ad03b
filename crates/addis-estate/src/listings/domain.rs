use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::accounts::UserId;

/// Identifier wrapper for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyId(pub Uuid);

impl PropertyId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PropertyId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    ResidentialLand,
    ApartmentSale,
    HouseRent,
}

impl Category {
    pub const fn label(self) -> &'static str {
        match self {
            Category::ResidentialLand => "residential_land",
            Category::ApartmentSale => "apartment_sale",
            Category::HouseRent => "house_rent",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "residential_land" => Some(Category::ResidentialLand),
            "apartment_sale" => Some(Category::ApartmentSale),
            "house_rent" => Some(Category::HouseRent),
            _ => None,
        }
    }
}

/// Physical kind of the property; `type` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    Land,
    Apartment,
    House,
    Villa,
    Condominium,
}

impl PropertyKind {
    pub const fn label(self) -> &'static str {
        match self {
            PropertyKind::Land => "land",
            PropertyKind::Apartment => "apartment",
            PropertyKind::House => "house",
            PropertyKind::Villa => "villa",
            PropertyKind::Condominium => "condominium",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "land" => Some(PropertyKind::Land),
            "apartment" => Some(PropertyKind::Apartment),
            "house" => Some(PropertyKind::House),
            "villa" => Some(PropertyKind::Villa),
            "condominium" => Some(PropertyKind::Condominium),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "ETB")]
    Etb,
    #[serde(rename = "USD")]
    Usd,
}

impl Default for Currency {
    fn default() -> Self {
        Currency::Etb
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaUnit {
    Sqm,
    Hectare,
}

impl Default for AreaUnit {
    fn default() -> Self {
        AreaUnit::Sqm
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub size: f64,
    #[serde(default)]
    pub unit: AreaUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub city: String,
    pub subcity: String,
    #[serde(default)]
    pub woreda: Option<String>,
    #[serde(default)]
    pub kebele: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Features {
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub bathrooms: Option<u32>,
    #[serde(default)]
    pub parking: bool,
    #[serde(default)]
    pub furnished: bool,
    #[serde(default)]
    pub garden: bool,
    #[serde(default)]
    pub security: bool,
}

/// Image metadata recorded against a listing. The bytes live with the
/// external file store; only the filename travels through this system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAttachment {
    pub filename: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

/// Moderation state. Every listing is born `pending`; `sold` and `rented`
/// are owner-set terminal extensions of `approved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Pending,
    Approved,
    Rejected,
    Sold,
    Rented,
}

impl ListingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ListingStatus::Pending => "pending",
            ListingStatus::Approved => "approved",
            ListingStatus::Rejected => "rejected",
            ListingStatus::Sold => "sold",
            ListingStatus::Rented => "rented",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(ListingStatus::Pending),
            "approved" => Some(ListingStatus::Approved),
            "rejected" => Some(ListingStatus::Rejected),
            "sold" => Some(ListingStatus::Sold),
            "rented" => Some(ListingStatus::Rented),
            _ => None,
        }
    }
}

/// A property listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: PropertyId,
    pub title: String,
    pub description: String,
    pub category: Category,
    #[serde(rename = "type")]
    pub kind: PropertyKind,
    pub price: u64,
    pub currency: Currency,
    pub area: Area,
    pub location: Location,
    pub features: Features,
    pub images: Vec<ImageAttachment>,
    pub owner: UserId,
    pub status: ListingStatus,
    pub is_active: bool,
    pub views: u64,
    pub approved_by: Option<UserId>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    /// A listing is on the public surface only while approved and active.
    /// Everything else reads as not-found to unauthenticated callers.
    pub fn is_publicly_visible(&self) -> bool {
        self.status == ListingStatus::Approved && self.is_active
    }
}

/// Fields a seller supplies when creating a listing. Status, ownership,
/// views, and moderation metadata are never caller-controlled.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    pub title: String,
    pub description: String,
    pub category: Category,
    #[serde(rename = "type")]
    pub kind: PropertyKind,
    pub price: u64,
    #[serde(default)]
    pub currency: Currency,
    pub area: Area,
    pub location: Location,
    #[serde(default)]
    pub features: Features,
}

/// Owner-editable patch. `status` is accepted only for the approved → sold
/// and approved → rented closures; moderation fields stay out of reach.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default, rename = "type")]
    pub kind: Option<PropertyKind>,
    #[serde(default)]
    pub price: Option<u64>,
    #[serde(default)]
    pub currency: Option<Currency>,
    #[serde(default)]
    pub area: Option<Area>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub features: Option<Features>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub status: Option<ListingStatus>,
}

/// Descriptor of a file the upload middleware already persisted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: String,
    pub size_bytes: u64,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

/// Owner contact block attached to public listing payloads.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// A listing plus the populated owner contact.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingView {
    #[serde(flatten)]
    pub listing: Property,
    pub owner_contact: Option<OwnerContact>,
}
