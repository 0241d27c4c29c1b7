use super::{
    CatalogCommandService,
    slug::{MAX_SLUG_ATTEMPTS, slug_race_exhausted},
};
use crate::{
    application::{
        access::ensure_superuser,
        dto::{AuthenticatedUser, CatalogEntryDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        catalog::{CatalogEntry, CatalogFields},
        errors::DomainError,
        slug::Slug,
    },
};
use chrono::{DateTime, Utc};

pub struct UpdateCatalogEntryCommand<F> {
    /// Current slug of the entry.
    pub slug: String,
    /// `None` keeps the slug, `Some("")` regenerates it from the new fields,
    /// anything else replaces it.
    pub new_slug: Option<String>,
    pub fields: F,
}

impl<F: CatalogFields> CatalogCommandService<F> {
    pub async fn update_entry(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateCatalogEntryCommand<F>,
    ) -> ApplicationResult<CatalogEntryDto<F>> {
        ensure_superuser(actor)?;
        command.fields.validate()?;
        self.ensure_references_exist(&command.fields).await?;

        let mut entry = self.load_by_slug(&command.slug).await?;
        let original_modified_at = entry.modified_at;
        let now = self.clock.now();
        entry.replace_fields(command.fields, now);

        let updated = match command.new_slug.as_deref() {
            None => self.repo.update(entry, original_modified_at).await?,
            Some("") => {
                self.update_with_regenerated_slug(entry, original_modified_at, now)
                    .await?
            }
            Some(explicit) => {
                let slug = self.explicit_slug(explicit)?;
                entry.set_slug(slug, now);
                self.repo.update(entry, original_modified_at).await?
            }
        };

        tracing::info!(
            kind = %F::KIND,
            id = %updated.id,
            slug = %updated.slug,
            name = %updated.fields.display_name(),
            actor = %actor.username,
            "catalog entry updated"
        );
        Ok(updated.into())
    }

    pub(super) async fn load_by_slug(&self, slug: &str) -> ApplicationResult<CatalogEntry<F>> {
        let not_found =
            || ApplicationError::not_found(format!("{} '{slug}' not found", F::KIND));
        let slug = Slug::new(slug).map_err(|_| not_found())?;
        self.repo.find_by_slug(&slug).await?.ok_or_else(not_found)
    }

    async fn update_with_regenerated_slug(
        &self,
        entry: CatalogEntry<F>,
        original_modified_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> ApplicationResult<CatalogEntry<F>> {
        let mut attempt = 1;
        loop {
            let slug = self.generated_slug(&entry.fields, Some(entry.id)).await?;
            let mut candidate = entry.clone();
            candidate.set_slug(slug, now);
            match self.repo.update(candidate, original_modified_at).await {
                Ok(updated) => return Ok(updated),
                Err(DomainError::DuplicateSlug(taken)) if attempt < MAX_SLUG_ATTEMPTS => {
                    tracing::warn!(
                        kind = %F::KIND,
                        slug = %taken,
                        attempt,
                        "slug was taken concurrently, regenerating"
                    );
                    attempt += 1;
                }
                Err(DomainError::DuplicateSlug(taken)) => {
                    return Err(slug_race_exhausted(F::KIND.label(), &taken));
                }
                Err(other) => return Err(other.into()),
            }
        }
    }
}
