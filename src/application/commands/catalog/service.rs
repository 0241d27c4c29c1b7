use std::collections::HashSet;
use std::sync::Arc;

use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::time::Clock,
};
use crate::domain::{
    catalog::{CatalogFields, CatalogReferenceChecker, CatalogRepository},
    slug::SlugService,
};

/// Writes for one catalog kind.
pub struct CatalogCommandService<F: CatalogFields> {
    pub(super) repo: Arc<dyn CatalogRepository<F>>,
    pub(super) references: Arc<dyn CatalogReferenceChecker>,
    pub(super) slug_service: Arc<SlugService>,
    pub(super) clock: Arc<dyn Clock>,
}

impl<F: CatalogFields> CatalogCommandService<F> {
    pub fn new(
        repo: Arc<dyn CatalogRepository<F>>,
        references: Arc<dyn CatalogReferenceChecker>,
        slug_service: Arc<SlugService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            references,
            slug_service,
            clock,
        }
    }

    /// Rejects fields pointing at entries that do not exist, naming the
    /// first offending field.
    pub(super) async fn ensure_references_exist(&self, fields: &F) -> ApplicationResult<()> {
        let references = fields.references();
        let mut kinds = Vec::new();
        for reference in &references {
            if !kinds.contains(&reference.kind) {
                kinds.push(reference.kind);
            }
        }

        let mut missing = HashSet::new();
        for kind in kinds {
            let ids: Vec<_> = references
                .iter()
                .filter(|r| r.kind == kind)
                .map(|r| r.id)
                .collect();
            for id in self.references.missing(kind, &ids).await? {
                missing.insert((kind, id));
            }
        }

        match references
            .iter()
            .find(|r| missing.contains(&(r.kind, r.id)))
        {
            Some(unknown) => Err(ApplicationError::validation(format!(
                "{} refers to unknown {} {}",
                unknown.field, unknown.kind, unknown.id
            ))),
            None => Ok(()),
        }
    }
}
