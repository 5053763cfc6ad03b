mod routing;

use std::sync::Arc;

use crate::accounts::{Role, User, UserRepository};
use crate::listings::ListingService;
use crate::testing::{MemoryProperties, MemoryUsers};

pub(super) fn build_service() -> (
    Arc<ListingService<MemoryProperties, MemoryUsers>>,
    Arc<MemoryProperties>,
    Arc<MemoryUsers>,
) {
    let properties = Arc::new(MemoryProperties::default());
    let users = Arc::new(MemoryUsers::default());
    let service = Arc::new(ListingService::new(properties.clone(), users.clone()));
    (service, properties, users)
}

pub(super) fn approved_seller(users: &MemoryUsers, email: &str, phone: &str) -> User {
    let mut seller = crate::testing::user(Role::Seller, email, phone);
    seller.is_approved = true;
    users.insert(seller).expect("seller stored")
}
