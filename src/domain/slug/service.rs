// src/domain/slug/service.rs
use std::sync::Arc;

use super::{
    Slug, SlugConfig, SlugGenerator, SlugLookup, SlugSource, build_base_slug,
    resolve_unique_slug,
};
use crate::domain::errors::DomainResult;

/// Domain service producing slugs that are unique within a collection.
pub struct SlugService {
    generator: Arc<dyn SlugGenerator>,
}

impl SlugService {
    pub fn new(generator: Arc<dyn SlugGenerator>) -> Self {
        Self { generator }
    }

    pub fn base_slug<S>(&self, source: &S, config: &SlugConfig) -> DomainResult<String>
    where
        S: SlugSource + ?Sized,
    {
        build_base_slug(source, config, self.generator.as_ref())
    }

    /// Validates the configuration against `source`, builds the base slug from
    /// its fields and disambiguates it against `lookup`. No lookup happens when
    /// the configuration is invalid.
    pub async fn generate_for<S, L>(
        &self,
        source: &S,
        config: &SlugConfig,
        lookup: &L,
    ) -> DomainResult<Slug>
    where
        S: SlugSource + Sync + ?Sized,
        L: SlugLookup + ?Sized,
    {
        let base = self.base_slug(source, config)?;
        resolve_unique_slug(lookup, &base, config.slug_field(), config.max_length()).await
    }
}
