// src/domain/slug/config.rs
use super::SlugSource;
use crate::domain::errors::{DomainError, DomainResult};

pub const DEFAULT_SLUG_MAX_LENGTH: usize = 150;
pub const DEFAULT_SLUG_FIELD: &str = "slug";

/// Per-type slug settings. Each sluggable type declares one of these as a
/// constant alongside its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlugConfig {
    source_fields: &'static [&'static str],
    max_length: usize,
    allow_unicode: bool,
    slug_field: &'static str,
    fallback: &'static str,
}

impl SlugConfig {
    /// A single `title` source field, 150 characters, ASCII output.
    pub const DEFAULT: SlugConfig = SlugConfig {
        source_fields: &["title"],
        max_length: DEFAULT_SLUG_MAX_LENGTH,
        allow_unicode: false,
        slug_field: DEFAULT_SLUG_FIELD,
        fallback: "item",
    };

    pub const fn new(source_fields: &'static [&'static str]) -> Self {
        Self {
            source_fields,
            ..Self::DEFAULT
        }
    }

    pub const fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub const fn with_unicode(mut self, allow_unicode: bool) -> Self {
        self.allow_unicode = allow_unicode;
        self
    }

    pub const fn with_slug_field(mut self, slug_field: &'static str) -> Self {
        self.slug_field = slug_field;
        self
    }

    /// Word used when the source text has no alphanumeric characters at all.
    pub const fn with_fallback(mut self, fallback: &'static str) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn source_fields(&self) -> &'static [&'static str] {
        self.source_fields
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn allow_unicode(&self) -> bool {
        self.allow_unicode
    }

    pub fn slug_field(&self) -> &'static str {
        self.slug_field
    }

    pub fn fallback(&self) -> &'static str {
        self.fallback
    }

    /// Verifies the configuration against a concrete instance: every declared
    /// source field must exist on `source`.
    pub fn check<S: SlugSource + ?Sized>(&self, source: &S) -> DomainResult<()> {
        if self.source_fields.is_empty() {
            return Err(DomainError::Configuration(
                "no source fields declared to generate slug from".into(),
            ));
        }
        if self.max_length == 0 {
            return Err(DomainError::Configuration(
                "slug max length must be positive".into(),
            ));
        }
        if let Some(missing) = self
            .source_fields
            .iter()
            .find(|field| !source.has_slug_field(field))
        {
            return Err(DomainError::Configuration(format!(
                "cannot find field '{missing}' in model to generate slug from"
            )));
        }
        Ok(())
    }
}

impl Default for SlugConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Titled {
        title: String,
    }

    impl SlugSource for Titled {
        fn slug_field(&self, name: &str) -> Option<String> {
            (name == "title").then(|| self.title.clone())
        }
    }

    struct Named {
        name: String,
    }

    impl SlugSource for Named {
        fn slug_field(&self, name: &str) -> Option<String> {
            (name == "name").then(|| self.name.clone())
        }
    }

    #[test]
    fn valid_single_field_configuration_passes() {
        let source = Titled {
            title: "John".into(),
        };
        assert!(SlugConfig::DEFAULT.check(&source).is_ok());
    }

    #[test]
    fn unknown_field_is_a_configuration_error() {
        let source = Titled {
            title: "Home on the range".into(),
        };
        let err = SlugConfig::new(&["name"]).check(&source).unwrap_err();
        assert!(matches!(err, DomainError::Configuration(msg) if msg.contains("'name'")));
    }

    #[test]
    fn default_configuration_requires_a_title() {
        let source = Named {
            name: "Monkey Robinson".into(),
        };
        let err = SlugConfig::default().check(&source).unwrap_err();
        assert!(matches!(err, DomainError::Configuration(_)));
    }

    #[test]
    fn degenerate_configurations_are_rejected() {
        let source = Titled { title: "x".into() };
        assert!(SlugConfig::new(&[]).check(&source).is_err());
        assert!(SlugConfig::DEFAULT.with_max_length(0).check(&source).is_err());
    }
}
