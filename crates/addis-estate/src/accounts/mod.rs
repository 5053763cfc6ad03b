//! The identity store: registration, login, profile reads, and the
//! role/approval flags the rest of the marketplace keys off.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{Address, Role, User, UserId, UserView};
pub use repository::{UserFilter, UserRepository};
pub use router::{accounts_router, AccountsState};
pub use service::{AccountError, AccountService, AuthSession, LoginRequest, RegisterRequest};
