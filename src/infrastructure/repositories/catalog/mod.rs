mod columns;
mod postgres;

pub use columns::{ColumnValue, LinkTable, PgCatalogFields};
pub use postgres::{PostgresCatalogReferences, PostgresCatalogRepository};
