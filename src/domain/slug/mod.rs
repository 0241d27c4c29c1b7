// src/domain/slug/mod.rs
//! Unique slug generation shared by every catalog entity.
//!
//! A slug is derived from one or more named attributes of an entity, reduced to
//! a URL-safe token and then disambiguated against the entity's collection by
//! appending `-1`, `-2`, ... until an unused value is found.

pub mod builder;
pub mod config;
pub mod resolver;
pub mod service;

pub use builder::{base_slug_from_text, build_base_slug, source_text, truncate_chars};
pub use config::{DEFAULT_SLUG_FIELD, DEFAULT_SLUG_MAX_LENGTH, SlugConfig};
pub use resolver::{SlugLookup, resolve_unique_slug, suffixed_candidate};
pub use service::SlugService;

use crate::domain::errors::{DomainError, DomainResult};
use std::fmt;

/// Text transformation from free text to a URL-safe token.
pub trait SlugGenerator: Send + Sync {
    fn slugify(&self, input: &str, allow_unicode: bool) -> String;
}

/// An entity exposing its attributes by name so a slug can be derived from them.
pub trait SlugSource {
    /// Text form of the named attribute, or `None` when the entity has no such
    /// attribute. Absent optional values are rendered as empty text.
    fn slug_field(&self, name: &str) -> Option<String>;

    fn has_slug_field(&self, name: &str) -> bool {
        self.slug_field(name).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::Validation("slug cannot be empty".into()));
        }
        if value.starts_with('-') || value.ends_with('-') || value.contains("--") {
            return Err(DomainError::Validation(format!(
                "slug '{value}' has misplaced separators"
            )));
        }
        if !value
            .chars()
            .all(|c| c == '-' || (c.is_alphanumeric() && !c.is_uppercase()))
        {
            return Err(DomainError::Validation(format!(
                "slug '{value}' may only contain lowercase letters, digits and hyphens"
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}
