// src/infrastructure/repositories/mod.rs
mod catalog;
mod error;
mod users;

pub use catalog::{
    ColumnValue, LinkTable, PgCatalogFields, PostgresCatalogReferences, PostgresCatalogRepository,
};
pub use error::{map_sqlx, map_sqlx_for_slug};
pub use users::PostgresUserRepository;
