// src/domain/catalog/mod.rs
pub mod cursor;
pub mod entity;
pub mod fields;
pub mod repository;
pub mod value_objects;

pub use cursor::CatalogListCursor;
pub use entity::{CatalogEntry, CatalogFields, CatalogReference, NewCatalogEntry};
pub use fields::{
    AuthorFields, EditionFields, GameFields, GameLicenseFields, GameSystemFields,
    ProductFields, PublisherFields,
};
pub use repository::{CatalogReferenceChecker, CatalogRepository, CatalogSlugLookup};
pub use value_objects::{
    CardSet, CatalogId, CatalogKind, Choice, DiceSet, Isbn, Mechanic, ProductType,
    SourcebookType,
};
