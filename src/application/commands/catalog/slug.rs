use super::CatalogCommandService;
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::{
        catalog::{CatalogFields, CatalogId, CatalogSlugLookup},
        slug::Slug,
    },
};

/// Generated slugs are retried this many times when another writer stores the
/// same slug between the uniqueness check and the write.
pub const MAX_SLUG_ATTEMPTS: usize = 5;

impl<F: CatalogFields> CatalogCommandService<F> {
    /// Checks a client supplied slug against the kind's slug settings.
    pub(super) fn explicit_slug(&self, value: &str) -> ApplicationResult<Slug> {
        let slug = Slug::new(value)?;
        let config = F::SLUG;
        if slug.char_len() > config.max_length() {
            return Err(ApplicationError::validation(format!(
                "slug must be at most {} characters",
                config.max_length()
            )));
        }
        if !config.allow_unicode() && !slug.as_str().is_ascii() {
            return Err(ApplicationError::validation(
                "slug may only contain ASCII letters, digits and hyphens",
            ));
        }
        Ok(slug)
    }

    /// Unique slug for `fields`, ignoring the entry `exclude` when given.
    pub(super) async fn generated_slug(
        &self,
        fields: &F,
        exclude: Option<CatalogId>,
    ) -> ApplicationResult<Slug> {
        let lookup = match exclude {
            Some(id) => CatalogSlugLookup::excluding(&*self.repo, id),
            None => CatalogSlugLookup::new(&*self.repo),
        };
        let slug = self
            .slug_service
            .generate_for(fields, &F::SLUG, &lookup)
            .await?;
        Ok(slug)
    }
}

pub(super) fn slug_race_exhausted(kind: &str, slug: &str) -> ApplicationError {
    ApplicationError::conflict(format!(
        "could not store a unique slug for {kind} after {MAX_SLUG_ATTEMPTS} attempts (last tried '{slug}')"
    ))
}
