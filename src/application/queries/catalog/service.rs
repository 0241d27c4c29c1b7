use std::sync::Arc;

use crate::domain::catalog::{CatalogFields, CatalogRepository};

/// Public reads for one catalog kind.
pub struct CatalogQueryService<F: CatalogFields> {
    pub(super) repo: Arc<dyn CatalogRepository<F>>,
}

impl<F: CatalogFields> CatalogQueryService<F> {
    pub fn new(repo: Arc<dyn CatalogRepository<F>>) -> Self {
        Self { repo }
    }
}
