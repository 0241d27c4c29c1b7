mod create;
mod delete;
mod service;
mod slug;
mod update;

pub use create::CreateCatalogEntryCommand;
pub use delete::DeleteCatalogEntryCommand;
pub use service::CatalogCommandService;
pub use slug::MAX_SLUG_ATTEMPTS;
pub use update::UpdateCatalogEntryCommand;
