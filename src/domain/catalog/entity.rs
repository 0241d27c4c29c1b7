// src/domain/catalog/entity.rs
use crate::domain::catalog::value_objects::{CatalogId, CatalogKind};
use crate::domain::errors::DomainResult;
use crate::domain::slug::{Slug, SlugConfig, SlugSource};
use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

/// Field set of one catalog kind. The slug configuration is fixed per type.
pub trait CatalogFields: SlugSource + Clone + fmt::Debug + Send + Sync + 'static {
    const KIND: CatalogKind;
    const SLUG: SlugConfig;

    fn validate(&self) -> DomainResult<()>;

    /// Human readable name used in logs and messages.
    fn display_name(&self) -> String;

    /// Other catalog entries these fields point at.
    fn references(&self) -> Vec<CatalogReference> {
        Vec::new()
    }
}

/// A pointer from one field of an entry to an entry of another kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogReference {
    pub field: &'static str,
    pub kind: CatalogKind,
    pub id: CatalogId,
}

impl CatalogReference {
    pub fn new(field: &'static str, kind: CatalogKind, id: Uuid) -> Self {
        Self {
            field,
            kind,
            id: CatalogId(id),
        }
    }

    pub fn many(field: &'static str, kind: CatalogKind, ids: &[Uuid]) -> Vec<Self> {
        ids.iter().map(|id| Self::new(field, kind, *id)).collect()
    }
}

#[derive(Debug, Clone)]
pub struct CatalogEntry<F> {
    pub id: CatalogId,
    pub slug: Slug,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub fields: F,
}

impl<F: CatalogFields> CatalogEntry<F> {
    pub fn replace_fields(&mut self, fields: F, now: DateTime<Utc>) {
        self.fields = fields;
        self.modified_at = now;
    }

    pub fn set_slug(&mut self, slug: Slug, now: DateTime<Utc>) {
        self.slug = slug;
        self.modified_at = now;
    }
}

#[derive(Debug, Clone)]
pub struct NewCatalogEntry<F> {
    pub id: CatalogId,
    pub slug: Slug,
    pub created_at: DateTime<Utc>,
    pub fields: F,
}

impl<F> NewCatalogEntry<F> {
    pub fn new(slug: Slug, fields: F, now: DateTime<Utc>) -> Self {
        Self {
            id: CatalogId::generate(),
            slug,
            created_at: now,
            fields,
        }
    }

    pub fn into_entry(self) -> CatalogEntry<F> {
        CatalogEntry {
            id: self.id,
            slug: self.slug,
            created_at: self.created_at,
            modified_at: self.created_at,
            fields: self.fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::fields::GameFields;

    fn game(title: &str) -> GameFields {
        GameFields {
            title: title.into(),
            img: None,
            url: None,
        }
    }

    #[test]
    fn new_entry_starts_unmodified() {
        let now = Utc::now();
        let entry = NewCatalogEntry::new(Slug::new("ironsworn").unwrap(), game("Ironsworn"), now)
            .into_entry();
        assert_eq!(entry.created_at, entry.modified_at);
        assert_eq!(entry.slug.as_str(), "ironsworn");
    }

    #[test]
    fn replacing_fields_touches_modified_at() {
        let now = Utc::now();
        let mut entry =
            NewCatalogEntry::new(Slug::new("ironsworn").unwrap(), game("Ironsworn"), now)
                .into_entry();
        let later = now + chrono::Duration::seconds(5);
        entry.replace_fields(game("Ironsworn: Starforged"), later);
        assert_eq!(entry.modified_at, later);
        assert_eq!(entry.created_at, now);
        assert_eq!(entry.fields.title, "Ironsworn: Starforged");
    }
}
