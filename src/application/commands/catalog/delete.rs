use super::CatalogCommandService;
use crate::{
    application::{access::ensure_superuser, dto::AuthenticatedUser, error::ApplicationResult},
    domain::catalog::CatalogFields,
};

pub struct DeleteCatalogEntryCommand {
    pub slug: String,
}

impl<F: CatalogFields> CatalogCommandService<F> {
    pub async fn delete_entry(
        &self,
        actor: &AuthenticatedUser,
        command: DeleteCatalogEntryCommand,
    ) -> ApplicationResult<()> {
        ensure_superuser(actor)?;
        let entry = self.load_by_slug(&command.slug).await?;
        self.repo.delete(entry.id).await?;
        tracing::info!(
            kind = %F::KIND,
            id = %entry.id,
            slug = %entry.slug,
            name = %entry.fields.display_name(),
            actor = %actor.username,
            "catalog entry deleted"
        );
        Ok(())
    }
}
