
use std::sync::Arc;

use crate::accounts::{AccountService, RegisterRequest, Role};
use crate::auth::AuthGuard;
use crate::testing::{token_authority, MemoryUsers};

pub(super) fn build_service() -> (Arc<AccountService<MemoryUsers>>, Arc<MemoryUsers>) {
    let users = Arc::new(MemoryUsers::default());
    let service = Arc::new(AccountService::new(users.clone(), token_authority()));
    (service, users)
}

pub(super) fn build_guard(users: Arc<MemoryUsers>) -> Arc<AuthGuard<MemoryUsers>> {
    Arc::new(AuthGuard::new(users, token_authority()))
}

pub(super) fn register_request(role: Role, email: &str, phone: &str) -> RegisterRequest {
    RegisterRequest {
        first_name: "Abebe".to_string(),
        last_name: "Bekele".to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        password: "secret123".to_string(),
        role: Some(role),
        address: None,
    }
}
