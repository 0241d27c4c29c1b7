// tests/support/mocks/catalog_repo.rs
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};
use tabletop_catalog::domain::{
    catalog::{
        CatalogEntry, CatalogFields, CatalogId, CatalogKind, CatalogReferenceChecker,
        CatalogRepository, NewCatalogEntry,
    },
    errors::{DomainError, DomainResult},
    slug::Slug,
};

/// Catalog collection kept in insertion order.
pub struct InMemoryCatalogRepo<F> {
    entries: Mutex<Vec<CatalogEntry<F>>>,
    lookups: AtomicUsize,
    stale_reads: AtomicBool,
}

impl<F> Default for InMemoryCatalogRepo<F> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            lookups: AtomicUsize::new(0),
            stale_reads: AtomicBool::new(false),
        }
    }
}

impl<F: CatalogFields> InMemoryCatalogRepo<F> {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn slugs(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .map(|entry| entry.slug.to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn contains(&self, id: CatalogId) -> bool {
        self.entries.lock().unwrap().iter().any(|e| e.id == id)
    }

    /// Number of slug existence queries served.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Stores an entry directly, bypassing the services.
    pub fn seed(&self, slug: &str, fields: F) -> CatalogEntry<F> {
        let entry = NewCatalogEntry::new(
            Slug::new(slug).expect("seed slug"),
            fields,
            super::time::fixed_now(),
        )
        .into_entry();
        self.entries.lock().unwrap().push(entry.clone());
        entry
    }

    /// Makes reads return an older `modified_at`, as if another writer saved
    /// the entry right after it was read.
    pub fn serve_stale_reads(&self) {
        self.stale_reads.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl<F: CatalogFields> CatalogRepository<F> for InMemoryCatalogRepo<F> {
    async fn insert(&self, entry: NewCatalogEntry<F>) -> DomainResult<CatalogEntry<F>> {
        let mut entries = self.entries.lock().unwrap();
        if entries.iter().any(|e| e.slug == entry.slug) {
            return Err(DomainError::DuplicateSlug(entry.slug.to_string()));
        }
        let stored = entry.into_entry();
        entries.push(stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        entry: CatalogEntry<F>,
        original_modified_at: DateTime<Utc>,
    ) -> DomainResult<CatalogEntry<F>> {
        let mut entries = self.entries.lock().unwrap();
        if entries
            .iter()
            .any(|e| e.slug == entry.slug && e.id != entry.id)
        {
            return Err(DomainError::DuplicateSlug(entry.slug.to_string()));
        }
        let stored = entries
            .iter_mut()
            .find(|e| e.id == entry.id)
            .ok_or_else(|| DomainError::NotFound("entry not found".into()))?;
        if stored.modified_at != original_modified_at {
            return Err(DomainError::Conflict("entry was modified concurrently".into()));
        }
        *stored = entry.clone();
        Ok(entry)
    }

    async fn delete(&self, id: CatalogId) -> DomainResult<()> {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Err(DomainError::NotFound("entry not found".into()));
        }
        Ok(())
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<CatalogEntry<F>>> {
        let found = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .find(|e| &e.slug == slug)
            .cloned();
        if self.stale_reads.load(Ordering::SeqCst) {
            return Ok(found.map(|mut entry| {
                entry.modified_at -= Duration::seconds(1);
                entry
            }));
        }
        Ok(found)
    }

    async fn list_page(&self, limit: u32, offset: u64) -> DomainResult<Vec<CatalogEntry<F>>> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn find_id_by_field(
        &self,
        field: &str,
        value: &str,
    ) -> DomainResult<Option<CatalogId>> {
        if field != "slug" {
            return Err(DomainError::Configuration(format!(
                "{} has no field '{field}'",
                F::KIND.table()
            )));
        }
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.slug.as_str() == value)
            .map(|e| e.id))
    }
}

/// Simulates another writer that stores the same slug between the uniqueness
/// check and each of the first `races` inserts.
pub struct RacingCatalogRepo<F> {
    inner: Arc<InMemoryCatalogRepo<F>>,
    races: AtomicUsize,
}

impl<F: CatalogFields> RacingCatalogRepo<F> {
    pub fn new(races: usize) -> Arc<Self> {
        Arc::new(Self {
            inner: InMemoryCatalogRepo::new(),
            races: AtomicUsize::new(races),
        })
    }

    pub fn inner(&self) -> &InMemoryCatalogRepo<F> {
        &self.inner
    }

    fn lose_race(&self) -> bool {
        self.races
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl<F: CatalogFields> CatalogRepository<F> for RacingCatalogRepo<F> {
    async fn insert(&self, entry: NewCatalogEntry<F>) -> DomainResult<CatalogEntry<F>> {
        if self.lose_race() {
            let rival =
                NewCatalogEntry::new(entry.slug.clone(), entry.fields.clone(), entry.created_at);
            self.inner.insert(rival).await?;
        }
        self.inner.insert(entry).await
    }

    async fn update(
        &self,
        entry: CatalogEntry<F>,
        original_modified_at: DateTime<Utc>,
    ) -> DomainResult<CatalogEntry<F>> {
        self.inner.update(entry, original_modified_at).await
    }

    async fn delete(&self, id: CatalogId) -> DomainResult<()> {
        self.inner.delete(id).await
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<CatalogEntry<F>>> {
        self.inner.find_by_slug(slug).await
    }

    async fn list_page(&self, limit: u32, offset: u64) -> DomainResult<Vec<CatalogEntry<F>>> {
        self.inner.list_page(limit, offset).await
    }

    async fn find_id_by_field(
        &self,
        field: &str,
        value: &str,
    ) -> DomainResult<Option<CatalogId>> {
        self.inner.find_id_by_field(field, value).await
    }
}

/// Treats every referenced id as stored.
pub struct AllReferencesExist;

#[async_trait]
impl CatalogReferenceChecker for AllReferencesExist {
    async fn missing(&self, _kind: CatalogKind, _ids: &[CatalogId]) -> DomainResult<Vec<CatalogId>> {
        Ok(Vec::new())
    }
}
