use std::cmp::Ordering;

use serde::Deserialize;

use super::domain::{Category, ListingStatus, Property, PropertyKind};
use crate::error::ApiError;
use crate::pagination::PageSpec;
use crate::validate::FieldError;

/// Default page size for the public listing search.
pub const PUBLIC_PAGE_LIMIT: u32 = 12;
/// Default page size for admin views and inquiry listings.
pub const ADMIN_PAGE_LIMIT: u32 = 10;

/// Raw, recognized query parameters for listing searches. Everything is
/// optional; unknown parameters are ignored by the extractor. Boolean
/// feature flags stay strings because only the literal `"true"` counts.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub city: Option<String>,
    pub subcity: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub parking: Option<String>,
    pub furnished: Option<String>,
    pub garden: Option<String>,
    pub security: Option<String>,
    pub sort_by: Option<String>,
    /// Honored only by the admin view; the public search pins its own
    /// visibility constraint.
    pub status: Option<String>,
}

/// Sort orders the store understands. Unknown `sortBy` values fall back to
/// newest-first, mirroring the recognized-or-default contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Newest,
    PriceAsc,
    PriceDesc,
    AreaAsc,
    AreaDesc,
    Views,
}

impl SortOrder {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("price_asc") => SortOrder::PriceAsc,
            Some("price_desc") => SortOrder::PriceDesc,
            Some("area_asc") => SortOrder::AreaAsc,
            Some("area_desc") => SortOrder::AreaDesc,
            Some("views") => SortOrder::Views,
            _ => SortOrder::Newest,
        }
    }

    pub fn compare(&self, a: &Property, b: &Property) -> Ordering {
        match self {
            SortOrder::Newest => b.created_at.cmp(&a.created_at),
            SortOrder::PriceAsc => a.price.cmp(&b.price),
            SortOrder::PriceDesc => b.price.cmp(&a.price),
            SortOrder::AreaAsc => a.area.size.total_cmp(&b.area.size),
            SortOrder::AreaDesc => b.area.size.total_cmp(&a.area.size),
            SortOrder::Views => b.views.cmp(&a.views),
        }
    }
}

/// The filter envelope handed to the listing store: which records match,
/// independent of ordering and pagination.
#[derive(Debug, Clone, Default)]
pub struct ListingFilter {
    pub status: Option<ListingStatus>,
    pub active: Option<bool>,
    pub category: Option<Category>,
    pub kind: Option<PropertyKind>,
    pub city: Option<String>,
    pub subcity: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub parking: bool,
    pub furnished: bool,
    pub garden: bool,
    pub security: bool,
    pub search: Option<String>,
}

impl ListingFilter {
    /// Build the public-search envelope: always constrained to approved and
    /// active listings, whatever the query says.
    pub fn public(query: &ListingQuery) -> Result<(Self, SortOrder, PageSpec), ApiError> {
        let mut filter = Self::from_query(query)?;
        filter.status = Some(ListingStatus::Approved);
        filter.active = Some(true);

        let sort = SortOrder::parse(query.sort_by.as_deref());
        let page = PageSpec::new(query.page, query.limit, PUBLIC_PAGE_LIMIT);
        Ok((filter, sort, page))
    }

    /// Build the admin envelope: every status is visible unless the query
    /// names one explicitly.
    pub fn admin(query: &ListingQuery) -> Result<(Self, SortOrder, PageSpec), ApiError> {
        let mut filter = Self::from_query(query)?;
        filter.status = match non_empty(query.status.as_deref()) {
            Some(raw) => Some(
                ListingStatus::parse(raw)
                    .ok_or_else(|| invalid_param("status", "Invalid property status"))?,
            ),
            None => None,
        };
        filter.active = None;

        let sort = SortOrder::parse(query.sort_by.as_deref());
        let page = PageSpec::new(query.page, query.limit, ADMIN_PAGE_LIMIT);
        Ok((filter, sort, page))
    }

    fn from_query(query: &ListingQuery) -> Result<Self, ApiError> {
        let category = match non_empty(query.category.as_deref()) {
            Some(raw) => Some(
                Category::parse(raw).ok_or_else(|| invalid_param("category", "Invalid category"))?,
            ),
            None => None,
        };
        let kind = match non_empty(query.kind.as_deref()) {
            Some(raw) => Some(
                PropertyKind::parse(raw)
                    .ok_or_else(|| invalid_param("type", "Invalid property type"))?,
            ),
            None => None,
        };

        Ok(Self {
            status: None,
            active: None,
            category,
            kind,
            city: non_empty(query.city.as_deref()).map(str::to_string),
            subcity: non_empty(query.subcity.as_deref()).map(str::to_string),
            min_price: query.min_price,
            max_price: query.max_price,
            min_area: query.min_area,
            max_area: query.max_area,
            bedrooms: query.bedrooms,
            bathrooms: query.bathrooms,
            parking: flag_set(query.parking.as_deref()),
            furnished: flag_set(query.furnished.as_deref()),
            garden: flag_set(query.garden.as_deref()),
            security: flag_set(query.security.as_deref()),
            search: non_empty(query.search.as_deref()).map(str::to_string),
        })
    }

    /// The predicate the in-memory store evaluates; a database-backed store
    /// would translate the same fields into its native operators.
    pub fn matches(&self, property: &Property) -> bool {
        if let Some(status) = self.status {
            if property.status != status {
                return false;
            }
        }
        if let Some(active) = self.active {
            if property.is_active != active {
                return false;
            }
        }
        if let Some(category) = self.category {
            if property.category != category {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if property.kind != kind {
                return false;
            }
        }
        if let Some(city) = &self.city {
            if !contains_ci(&property.location.city, city) {
                return false;
            }
        }
        if let Some(subcity) = &self.subcity {
            if !contains_ci(&property.location.subcity, subcity) {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if property.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if property.price > max {
                return false;
            }
        }
        if let Some(min) = self.min_area {
            if property.area.size < min {
                return false;
            }
        }
        if let Some(max) = self.max_area {
            if property.area.size > max {
                return false;
            }
        }
        if let Some(bedrooms) = self.bedrooms {
            if property.features.bedrooms.unwrap_or(0) < bedrooms {
                return false;
            }
        }
        if let Some(bathrooms) = self.bathrooms {
            if property.features.bathrooms.unwrap_or(0) < bathrooms {
                return false;
            }
        }
        if self.parking && !property.features.parking {
            return false;
        }
        if self.furnished && !property.features.furnished {
            return false;
        }
        if self.garden && !property.features.garden {
            return false;
        }
        if self.security && !property.features.security {
            return false;
        }
        if let Some(needle) = &self.search {
            if !contains_ci(&property.title, needle) && !contains_ci(&property.description, needle)
            {
                return false;
            }
        }
        true
    }
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

/// Feature flags narrow the search only when the parameter is literally
/// `"true"`; every other value leaves the flag out of the filter.
fn flag_set(raw: Option<&str>) -> bool {
    raw == Some("true")
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack
        .to_lowercase()
        .contains(&needle.to_lowercase())
}

fn invalid_param(field: &'static str, message: &'static str) -> ApiError {
    ApiError::Validation(vec![FieldError { field, message }])
}
