use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use addis_estate::accounts::{User, UserFilter, UserId, UserRepository};
use addis_estate::inquiries::{Inquiry, InquiryId, InquiryRepository, InquiryStatus};
use addis_estate::listings::{
    ListingFilter, ListingStatus, Property, PropertyId, PropertyRepository, SortOrder,
};
use addis_estate::pagination::{Page, PageSpec};
use addis_estate::store::StoreError;
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Identity store backed by a process-local map. Uniqueness of email and
/// phone is enforced here, standing in for the database's unique indexes.
#[derive(Default, Clone)]
pub(crate) struct InMemoryUserRepository {
    records: Arc<Mutex<HashMap<UserId, User>>>,
}

impl UserRepository for InMemoryUserRepository {
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

/// Listing store backed by a process-local map. The filter predicate and
/// sort comparator come from the query builder, exactly what a database
/// adapter would translate into native operators.
#[derive(Default, Clone)]
pub(crate) struct InMemoryPropertyRepository {
    records: Arc<Mutex<HashMap<PropertyId, Property>>>,
}

impl PropertyRepository for InMemoryPropertyRepository {
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

/// Inquiry store backed by a process-local map.
#[derive(Default, Clone)]
pub(crate) struct InMemoryInquiryRepository {
    records: Arc<Mutex<HashMap<InquiryId, Inquiry>>>,
}

impl InquiryRepository for InMemoryInquiryRepository {
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

#[cfg(test)]
mod tests {
    use super::*;
    use addis_estate::accounts::{Address, Role};
    use chrono::Utc;

    fn sample_user(role: Role, email: &str, phone: &str) -> User {
        let now = Utc::now();
        User {
            id: UserId::new(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            password_hash: "unused".to_string(),
            role,
            is_verified: false,
            is_approved: role.approved_on_registration(),
            profile_image: None,
            address: Address::default(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn user_store_enforces_email_and_phone_uniqueness() {
        let repository = InMemoryUserRepository::default();
        repository
            .insert(sample_user(Role::Buyer, "a@x.com", "+251911111111"))
            .expect("first insert succeeds");

        let email_clash = repository.insert(sample_user(Role::Buyer, "a@x.com", "+251922222222"));
        assert!(matches!(email_clash, Err(StoreError::Conflict)));

        let phone_clash = repository.insert(sample_user(Role::Buyer, "b@x.com", "+251911111111"));
        assert!(matches!(phone_clash, Err(StoreError::Conflict)));
    }

    #[test]
    fn updating_an_unknown_user_is_not_found() {
        let repository = InMemoryUserRepository::default();
        let unknown = sample_user(Role::Buyer, "a@x.com", "+251911111111");
        assert!(matches!(
            repository.update(unknown),
            Err(StoreError::NotFound)
        ));
    }

    #[test]
    fn user_listing_pages_newest_first() {
        let repository = InMemoryUserRepository::default();
        for i in 0..5 {
            let mut user = sample_user(
                Role::Buyer,
                &format!("user{i}@x.com"),
                &format!("+25191111111{i}"),
            );
            user.created_at = Utc::now() - chrono::Duration::minutes(i);
            repository.insert(user).expect("insert succeeds");
        }

        let page = repository
            .list(&UserFilter::default(), &PageSpec::new(Some(1), Some(3), 10))
            .expect("listing succeeds");
        assert_eq!(page.total, 5);
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.items[0].email, "user0@x.com");
        assert!(page.pagination.has_next);
    }
}
