// src/domain/slug/resolver.rs
use super::{Slug, truncate_chars};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;

/// Exact-match existence query against the collection a slug must be unique in.
#[async_trait]
pub trait SlugLookup: Send + Sync {
    /// Returns whether a record whose `field` equals `value` exists. Fails with
    /// a configuration error when the collection has no such field.
    async fn slug_exists(&self, field: &str, value: &str) -> DomainResult<bool>;
}

/// Builds the `n`th disambiguated candidate for `base`.
///
/// The base is cut (never the suffix) so the candidate fits in `max_length`
/// characters. Always starts over from the untouched base. Returns `None` when
/// the suffix leaves no room for at least one base character.
pub fn suffixed_candidate(base: &str, n: u64, max_length: usize) -> Option<String> {
    let suffix = format!("-{n}");
    let room = max_length.checked_sub(suffix.len())?;
    let stem = truncate_chars(base, room).trim_end_matches('-');
    if stem.is_empty() {
        return None;
    }
    Some(format!("{stem}{suffix}"))
}

/// Returns `base` when it is unused in the collection, otherwise the first
/// unused `base-n` for n = 1, 2, ...
pub async fn resolve_unique_slug<L>(
    lookup: &L,
    base: &str,
    slug_field: &str,
    max_length: usize,
) -> DomainResult<Slug>
where
    L: SlugLookup + ?Sized,
{
    let base = truncate_chars(base, max_length).trim_end_matches('-');
    if base.is_empty() {
        return Err(DomainError::Validation("cannot build a slug from empty text".into()));
    }

    tracing::debug!(slug = base, "testing uniqueness of base slug");
    if !lookup.slug_exists(slug_field, base).await? {
        tracing::debug!(slug = base, "slug is unique");
        return Slug::new(base);
    }

    let mut next: u64 = 1;
    loop {
        let candidate = suffixed_candidate(base, next, max_length).ok_or_else(|| {
            DomainError::Conflict(format!(
                "no unique slug for '{base}' fits within {max_length} characters"
            ))
        })?;

        tracing::debug!(slug = %candidate, attempt = next, "testing uniqueness of slug");
        if !lookup.slug_exists(slug_field, &candidate).await? {
            tracing::debug!(slug = %candidate, "slug is unique");
            return Slug::new(candidate);
        }
        next += 1;
    }
}
