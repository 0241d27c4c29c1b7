mod get_by_slug;
mod list;
mod service;

pub use list::{DEFAULT_PAGE_SIZE, ListCatalogQuery, MAX_PAGE_SIZE};
pub use service::CatalogQueryService;
