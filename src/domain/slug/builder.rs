// src/domain/slug/builder.rs
use super::{SlugConfig, SlugGenerator, SlugSource};
use crate::domain::errors::{DomainError, DomainResult};

/// Gathers the configured source fields into the text a slug is built from.
///
/// A single field is used verbatim; several fields are joined with one space
/// in declaration order.
pub fn source_text<S: SlugSource + ?Sized>(
    source: &S,
    config: &SlugConfig,
) -> DomainResult<String> {
    config.check(source)?;

    match config.source_fields() {
        [single] => field_text(source, single),
        fields => {
            let parts = fields
                .iter()
                .map(|field| field_text(source, field))
                .collect::<DomainResult<Vec<_>>>()?;
            Ok(parts.join(" "))
        }
    }
}

fn field_text<S: SlugSource + ?Sized>(source: &S, field: &str) -> DomainResult<String> {
    source.slug_field(field).ok_or_else(|| {
        DomainError::Configuration(format!(
            "cannot find field '{field}' in model to generate slug from"
        ))
    })
}

/// Returns the longest prefix of `text` holding at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Truncates `text` to the configured length, slugifies it and falls back to
/// the configured word when nothing usable remains.
pub fn base_slug_from_text(
    text: &str,
    config: &SlugConfig,
    generator: &dyn SlugGenerator,
) -> String {
    let max_length = config.max_length();
    let slugified = generator.slugify(truncate_chars(text, max_length), config.allow_unicode());
    // transliteration may lengthen the token
    let slug = truncate_chars(&slugified, max_length).trim_end_matches('-');

    if slug.is_empty() {
        truncate_chars(config.fallback(), max_length).to_string()
    } else {
        slug.to_string()
    }
}

pub fn build_base_slug<S: SlugSource + ?Sized>(
    source: &S,
    config: &SlugConfig,
    generator: &dyn SlugGenerator,
) -> DomainResult<String> {
    let text = source_text(source, config)?;
    Ok(base_slug_from_text(&text, config, generator))
}
