use super::CatalogQueryService;
use crate::{
    application::{
        dto::CatalogEntryDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{catalog::CatalogFields, slug::Slug},
};

impl<F: CatalogFields> CatalogQueryService<F> {
    pub async fn get_by_slug(&self, slug: &str) -> ApplicationResult<CatalogEntryDto<F>> {
        let not_found =
            || ApplicationError::not_found(format!("{} '{slug}' not found", F::KIND));
        // Malformed slugs cannot exist in the collection.
        let parsed = Slug::new(slug).map_err(|_| not_found())?;
        let entry = self
            .repo
            .find_by_slug(&parsed)
            .await?
            .ok_or_else(not_found)?;
        Ok(entry.into())
    }
}
