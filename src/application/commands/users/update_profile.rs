use super::UserCommandService;
use crate::{
    application::{
        access::ensure_can_edit_profile,
        dto::{AuthenticatedUser, UserDetailDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{PersonName, ProfileUpdate, Timezone, Username},
};

/// Fields left as `None` keep their stored value.
pub struct UpdateProfileCommand {
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub timezone: Option<String>,
}

impl UserCommandService {
    pub async fn update_profile(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateProfileCommand,
    ) -> ApplicationResult<UserDetailDto> {
        let not_found =
            || ApplicationError::not_found(format!("user '{}' not found", command.username));
        let username = Username::new(command.username.clone()).map_err(|_| not_found())?;
        let account = self
            .user_repo
            .find_account(&username)
            .await?
            .ok_or_else(not_found)?;
        ensure_can_edit_profile(actor, &account.user)?;

        let first_name = match command.first_name {
            Some(value) => PersonName::new(value)?,
            None => account.user.first_name.clone(),
        };
        let last_name = match command.last_name {
            Some(value) => PersonName::new(value)?,
            None => account.user.last_name.clone(),
        };
        let timezone = match command.timezone.as_deref() {
            Some(value) => Timezone::new(value)?,
            None => account.profile.timezone,
        };

        let updated = self
            .user_repo
            .update_profile(ProfileUpdate {
                user_id: account.user.id,
                first_name,
                last_name,
                timezone,
            })
            .await?;
        tracing::info!(
            user_id = %updated.user.id,
            actor = %actor.username,
            timezone = %updated.profile.timezone,
            "profile updated"
        );
        Ok(updated.into())
    }
}
