// src/domain/catalog/repository.rs
use crate::domain::catalog::entity::{CatalogEntry, CatalogFields, NewCatalogEntry};
use crate::domain::catalog::value_objects::{CatalogId, CatalogKind};
use crate::domain::errors::DomainResult;
use crate::domain::slug::{Slug, SlugLookup};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait CatalogRepository<F: CatalogFields>: Send + Sync {
    /// Fails with `DuplicateSlug` when the slug is already stored.
    async fn insert(&self, entry: NewCatalogEntry<F>) -> DomainResult<CatalogEntry<F>>;

    /// Writes `entry` if the stored row still carries `original_modified_at`,
    /// otherwise fails with `Conflict`.
    async fn update(
        &self,
        entry: CatalogEntry<F>,
        original_modified_at: DateTime<Utc>,
    ) -> DomainResult<CatalogEntry<F>>;

    async fn delete(&self, id: CatalogId) -> DomainResult<()>;

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<CatalogEntry<F>>>;

    /// One page in the kind's display order.
    async fn list_page(&self, limit: u32, offset: u64) -> DomainResult<Vec<CatalogEntry<F>>>;

    /// Id of the entry whose `field` equals `value`. Unknown fields are a
    /// configuration error.
    async fn find_id_by_field(&self, field: &str, value: &str)
    -> DomainResult<Option<CatalogId>>;
}

/// Existence checks across all catalog collections.
#[async_trait]
pub trait CatalogReferenceChecker: Send + Sync {
    /// The ids in `ids` with no stored entry of `kind`.
    async fn missing(&self, kind: CatalogKind, ids: &[CatalogId]) -> DomainResult<Vec<CatalogId>>;
}

/// Slug existence checks against a catalog collection, optionally ignoring
/// the entry whose slug is being regenerated.
pub struct CatalogSlugLookup<'a, F: CatalogFields> {
    repo: &'a dyn CatalogRepository<F>,
    exclude: Option<CatalogId>,
}

impl<'a, F: CatalogFields> CatalogSlugLookup<'a, F> {
    pub fn new(repo: &'a dyn CatalogRepository<F>) -> Self {
        Self {
            repo,
            exclude: None,
        }
    }

    pub fn excluding(repo: &'a dyn CatalogRepository<F>, id: CatalogId) -> Self {
        Self {
            repo,
            exclude: Some(id),
        }
    }
}

#[async_trait]
impl<'a, F: CatalogFields> SlugLookup for CatalogSlugLookup<'a, F> {
    async fn slug_exists(&self, field: &str, value: &str) -> DomainResult<bool> {
        let owner = self.repo.find_id_by_field(field, value).await?;
        Ok(match owner {
            Some(id) => Some(id) != self.exclude,
            None => false,
        })
    }
}
