// src/application/access.rs
use crate::{
    application::{
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{CanEditProfile, ProfileSpecification, User},
};

/// Catalog curation is reserved to superusers.
pub(crate) fn ensure_superuser(actor: &AuthenticatedUser) -> ApplicationResult<()> {
    if actor.is_superuser {
        Ok(())
    } else {
        Err(ApplicationError::forbidden("superuser privileges are required"))
    }
}

pub(crate) fn ensure_can_edit_profile(
    actor: &AuthenticatedUser,
    target: &User,
) -> ApplicationResult<()> {
    let spec = CanEditProfile {
        actor_id: actor.id,
        actor_is_superuser: actor.is_superuser,
    };
    if spec.is_satisfied_by(target) {
        Ok(())
    } else {
        Err(ApplicationError::forbidden(format!(
            "not allowed to access the profile of '{}'",
            target.username
        )))
    }
}
