use super::{
    CatalogCommandService,
    slug::{MAX_SLUG_ATTEMPTS, slug_race_exhausted},
};
use crate::{
    application::{
        access::ensure_superuser,
        dto::{AuthenticatedUser, CatalogEntryDto},
        error::ApplicationResult,
    },
    domain::{
        catalog::{CatalogEntry, CatalogFields, NewCatalogEntry},
        errors::DomainError,
    },
};
use chrono::{DateTime, Utc};

pub struct CreateCatalogEntryCommand<F> {
    /// Generated from the kind's source fields when absent or empty.
    pub slug: Option<String>,
    pub fields: F,
}

impl<F: CatalogFields> CatalogCommandService<F> {
    pub async fn create_entry(
        &self,
        actor: &AuthenticatedUser,
        command: CreateCatalogEntryCommand<F>,
    ) -> ApplicationResult<CatalogEntryDto<F>> {
        ensure_superuser(actor)?;
        command.fields.validate()?;
        self.ensure_references_exist(&command.fields).await?;
        let now = self.clock.now();

        let created = match command.slug.as_deref().filter(|s| !s.is_empty()) {
            Some(explicit) => {
                let slug = self.explicit_slug(explicit)?;
                self.repo
                    .insert(NewCatalogEntry::new(slug, command.fields, now))
                    .await?
            }
            None => self.insert_with_generated_slug(command.fields, now).await?,
        };

        tracing::info!(
            kind = %F::KIND,
            id = %created.id,
            slug = %created.slug,
            name = %created.fields.display_name(),
            actor = %actor.username,
            "catalog entry created"
        );
        Ok(created.into())
    }

    async fn insert_with_generated_slug(
        &self,
        fields: F,
        now: DateTime<Utc>,
    ) -> ApplicationResult<CatalogEntry<F>> {
        let mut attempt = 1;
        loop {
            let slug = self.generated_slug(&fields, None).await?;
            let entry = NewCatalogEntry::new(slug, fields.clone(), now);
            match self.repo.insert(entry).await {
                Ok(created) => return Ok(created),
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
