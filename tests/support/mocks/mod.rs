// tests/support/mocks/mod.rs
pub mod catalog_repo;
pub mod security;
pub mod slug;
pub mod time;
pub mod user_repo;

pub use catalog_repo::{AllReferencesExist, InMemoryCatalogRepo, RacingCatalogRepo};
pub use security::{
    ADMIN_TOKEN, DummyPasswordHasher, DummyTokenManager, EXPIRED_TOKEN, MEMBER_TOKEN, OTHER_TOKEN,
    admin_user, member_user, other_user,
};
pub use slug::SetLookup;
pub use time::{FixedClock, fixed_now};
pub use user_repo::InMemoryUserRepo;
