//! In-memory repositories and fixtures shared by the unit tests. The
//! deployable service carries its own copies in `services/api/src/infra.rs`;
//! these stay test-only.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};

use crate::accounts::{Address, Role, User, UserFilter, UserId, UserRepository};
use crate::auth::TokenAuthority;
use crate::inquiries::{Inquiry, InquiryId, InquiryRepository, InquiryStatus};
use crate::listings::{
    Area, AreaUnit, Category, Currency, Features, ListingFilter, ListingStatus, Location,
    NewListing, Property, PropertyId, PropertyKind, PropertyRepository, SortOrder,
};
use crate::pagination::{Page, PageSpec};
use crate::store::StoreError;

#[derive(Default, Clone)]
pub(crate) struct MemoryUsers {
    records: Arc<Mutex<HashMap<UserId, User>>>,
}

impl UserRepository for MemoryUsers {
    fn insert(&self, user: User) -> Result<User, StoreError> {
        let mut guard = self.records.lock().expect("user store mutex poisoned");
        let taken = guard
            .values()
            .any(|existing| existing.email == user.email || existing.phone == user.phone);
        if taken {
            return Err(StoreError::Conflict);
        }
        guard.insert(user.id, user.clone());
        Ok(user)
    }

    fn update(&self, user: User) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("user store mutex poisoned");
        if guard.contains_key(&user.id) {
            guard.insert(user.id, user);
            Ok(())
        } else {
            Err(StoreError::NotFound)
        }
    }

    fn fetch(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        let guard = self.records.lock().expect("user store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn fetch_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let guard = self.records.lock().expect("user store mutex poisoned");
        Ok(guard.values().find(|user| user.email == email).cloned())
    }

    fn delete(&self, id: &UserId) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("user store mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(StoreError::NotFound)
    }

    fn list(&self, filter: &UserFilter, page: &PageSpec) -> Result<Page<User>, StoreError> {
        let guard = self.records.lock().expect("user store mutex poisoned");
        let mut matching: Vec<User> = guard
            .values()
            .filter(|user| filter.matches(user))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(Page::slice(matching, page))
    }

    fn count(&self, filter: &UserFilter) -> Result<u64, StoreError> {
        let guard = self.records.lock().expect("user store mutex poisoned");
        Ok(guard.values().filter(|user| filter.matches(user)).count() as u64)
    }
}

#[derive(Default, Clone)]
pub(crate) struct MemoryProperties {
    records: Arc<Mutex<HashMap<PropertyId, Property>>>,
}

impl PropertyRepository for MemoryProperties {
    fn insert(&self, property: Property) -> Result<Property, StoreError> {
        let mut guard = self.records.lock().expect("listing store mutex poisoned");
        if guard.contains_key(&property.id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(property.id, property.clone());
        Ok(property)
    }

    fn update(&self, property: Property) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("listing store mutex poisoned");
        if guard.contains_key(&property.id) {
            guard.insert(property.id, property);
            Ok(())
        } else {
            Err(StoreError::NotFound)
        }
    }

    fn fetch(&self, id: &PropertyId) -> Result<Option<Property>, StoreError> {
        let guard = self.records.lock().expect("listing store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn delete(&self, id: &PropertyId) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("listing store mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(StoreError::NotFound)
    }

    fn search(
        &self,
        filter: &ListingFilter,
        sort: SortOrder,
        page: &PageSpec,
    ) -> Result<Page<Property>, StoreError> {
        let guard = self.records.lock().expect("listing store mutex poisoned");
        let mut matching: Vec<Property> = guard
            .values()
            .filter(|property| filter.matches(property))
            .cloned()
            .collect();
        matching.sort_by(|a, b| sort.compare(a, b));
        Ok(Page::slice(matching, page))
    }

    fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Property>, StoreError> {
        let guard = self.records.lock().expect("listing store mutex poisoned");
        let mut owned: Vec<Property> = guard
            .values()
            .filter(|property| property.owner == *owner)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    fn count_by_status(&self, status: Option<ListingStatus>) -> Result<u64, StoreError> {
        let guard = self.records.lock().expect("listing store mutex poisoned");
        Ok(guard
            .values()
            .filter(|property| status.map_or(true, |wanted| property.status == wanted))
            .count() as u64)
    }
}

#[derive(Default, Clone)]
pub(crate) struct MemoryInquiries {
    records: Arc<Mutex<HashMap<InquiryId, Inquiry>>>,
}

impl InquiryRepository for MemoryInquiries {
    fn insert(&self, inquiry: Inquiry) -> Result<Inquiry, StoreError> {
        let mut guard = self.records.lock().expect("inquiry store mutex poisoned");
        if guard.contains_key(&inquiry.id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(inquiry.id, inquiry.clone());
        Ok(inquiry)
    }

    fn update(&self, inquiry: Inquiry) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("inquiry store mutex poisoned");
        if guard.contains_key(&inquiry.id) {
            guard.insert(inquiry.id, inquiry);
            Ok(())
        } else {
            Err(StoreError::NotFound)
        }
    }

    fn fetch(&self, id: &InquiryId) -> Result<Option<Inquiry>, StoreError> {
        let guard = self.records.lock().expect("inquiry store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list_received(
        &self,
        owner: &UserId,
        status: Option<InquiryStatus>,
        page: &PageSpec,
    ) -> Result<Page<Inquiry>, StoreError> {
        let guard = self.records.lock().expect("inquiry store mutex poisoned");
        let mut matching: Vec<Inquiry> = guard
            .values()
            .filter(|inquiry| inquiry.property_owner == *owner)
            .filter(|inquiry| status.map_or(true, |wanted| inquiry.status == wanted))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(Page::slice(matching, page))
    }

    fn list_sent(&self, inquirer: &UserId, page: &PageSpec) -> Result<Page<Inquiry>, StoreError> {
        let guard = self.records.lock().expect("inquiry store mutex poisoned");
        let mut matching: Vec<Inquiry> = guard
            .values()
            .filter(|inquiry| inquiry.inquirer == *inquirer)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(Page::slice(matching, page))
    }

    fn count(&self, status: Option<InquiryStatus>) -> Result<u64, StoreError> {
        let guard = self.records.lock().expect("inquiry store mutex poisoned");
        Ok(guard
            .values()
            .filter(|inquiry| status.map_or(true, |wanted| inquiry.status == wanted))
            .count() as u64)
    }
}

pub(crate) fn token_authority() -> Arc<TokenAuthority> {
    Arc::new(TokenAuthority::new("test-secret", 1))
}

/// A stored user with a placeholder hash; use the account service when the
/// password itself matters.
pub(crate) fn user(role: Role, email: &str, phone: &str) -> User {
    let now = Utc::now();
    User {
        id: UserId::new(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        password_hash: "unused-hash".to_string(),
        role,
        is_verified: false,
        is_approved: role.approved_on_registration(),
        profile_image: None,
        address: Address::default(),
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn draft_listing(title: &str) -> NewListing {
    NewListing {
        title: title.to_string(),
        description: "Well-lit two bedroom apartment close to the ring road".to_string(),
        category: Category::ApartmentSale,
        kind: PropertyKind::Apartment,
        price: 4_500_000,
        currency: Currency::Etb,
        area: Area {
            size: 85.0,
            unit: AreaUnit::Sqm,
        },
        location: Location {
            city: "Addis Ababa".to_string(),
            subcity: "Bole".to_string(),
            woreda: None,
            kebele: None,
            coordinates: None,
        },
        features: Features {
            bedrooms: Some(2),
            bathrooms: Some(1),
            parking: true,
            furnished: false,
            garden: false,
            security: true,
        },
    }
}

/// A stored listing in the given moderation state, offset into the past so
/// ordering tests can stagger creation times.
pub(crate) fn property(
    owner: &UserId,
    status: ListingStatus,
    title: &str,
    age_minutes: i64,
) -> Property {
    let created = Utc::now() - Duration::minutes(age_minutes);
    Property {
        id: PropertyId::new(),
        title: title.to_string(),
        description: "Well-lit two bedroom apartment close to the ring road".to_string(),
        category: Category::ApartmentSale,
        kind: PropertyKind::Apartment,
        price: 4_500_000,
        currency: Currency::Etb,
        area: Area {
            size: 85.0,
            unit: AreaUnit::Sqm,
        },
        location: Location {
            city: "Addis Ababa".to_string(),
            subcity: "Bole".to_string(),
            woreda: None,
            kebele: None,
            coordinates: None,
        },
        features: Features::default(),
        images: Vec::new(),
        owner: *owner,
        status,
        is_active: true,
        views: 0,
        approved_by: None,
        approved_at: None,
        rejection_reason: None,
        created_at: created,
        updated_at: created,
    }
}
