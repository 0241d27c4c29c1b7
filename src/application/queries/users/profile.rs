use super::UserQueryService;
use crate::{
    application::{
        access::ensure_can_edit_profile,
        dto::{AuthenticatedUser, UserDetailDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::Username,
};

impl UserQueryService {
    /// The caller's own account.
    pub async fn me(&self, actor: &AuthenticatedUser) -> ApplicationResult<UserDetailDto> {
        let username = Username::new(actor.username.clone())?;
        let account = self
            .user_repo
            .find_account(&username)
            .await?
            .filter(|account| account.user.id == actor.id)
            .ok_or_else(|| ApplicationError::unauthorized("account no longer exists"))?;
        Ok(account.into())
    }

    pub async fn get_user_detail(
        &self,
        actor: &AuthenticatedUser,
        username: &str,
    ) -> ApplicationResult<UserDetailDto> {
        let not_found = || ApplicationError::not_found(format!("user '{username}' not found"));
        let username = Username::new(username).map_err(|_| not_found())?;
        let account = self
            .user_repo
            .find_account(&username)
            .await?
            .ok_or_else(not_found)?;
        ensure_can_edit_profile(actor, &account.user)?;
        Ok(account.into())
    }
}
