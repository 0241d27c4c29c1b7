pub mod auth;
pub mod catalog;
pub mod pagination;
pub mod users;

pub use auth::{AuthTokenDto, AuthenticatedUser, TokenSubject};
pub use catalog::{CatalogChoicesDto, CatalogEntryDto};
pub use pagination::CursorPage;
pub use users::{UserDetailDto, UserDto};
