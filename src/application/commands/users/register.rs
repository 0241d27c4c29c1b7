use super::{UserCommandService, password::validate_password};
use crate::{
    application::{
        dto::{AuthenticatedUser, UserDetailDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{NewUser, PasswordHash, PersonName, UserAccount, Username},
};

pub struct RegisterUserCommand {
    pub username: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Only honoured when a superuser creates the account.
    pub is_superuser: bool,
}

impl UserCommandService {
    /// The very first account becomes a superuser without an actor. Every
    /// later account must be created by a superuser.
    pub async fn register(
        &self,
        actor: Option<&AuthenticatedUser>,
        command: RegisterUserCommand,
    ) -> ApplicationResult<UserDetailDto> {
        let username = Username::new(command.username)?;
        validate_password(&command.password)?;
        let first_name = PersonName::new(command.first_name.unwrap_or_default())?;
        let last_name = PersonName::new(command.last_name.unwrap_or_default())?;

        let first = self.user_repo.count().await? == 0;
        if !first {
            self.authorize_registration(actor, &username).await?;
        }

        let hashed = self.password_hasher.hash(&command.password).await?;
        let password_hash = PasswordHash::new(hashed)?;
        let new_user = NewUser::new(
            username,
            password_hash,
            self.default_timezone,
            self.clock.now(),
        )
        .with_names(first_name, last_name);

        let account = if first {
            self.insert_first_or_authorized(actor, new_user, command.is_superuser).await?
        } else {
            self.user_repo
                .insert(new_user.as_superuser(command.is_superuser))
                .await?
        };

        tracing::info!(
            user_id = %account.user.id,
            username = %account.user.username,
            is_superuser = account.user.is_superuser,
            "user registered"
        );
        Ok(account.into())
    }

    /// The store decides atomically whether the account is still the first
    /// one. When another registration won, this one needs a superuser actor.
    async fn insert_first_or_authorized(
        &self,
        actor: Option<&AuthenticatedUser>,
        new_user: NewUser,
        requested_superuser: bool,
    ) -> ApplicationResult<UserAccount> {
        let candidate = new_user.clone().as_superuser(true);
        if let Some(account) = self.user_repo.insert_first(candidate).await? {
            return Ok(account);
        }

        tracing::warn!(
            username = %new_user.username,
            "another account was registered first"
        );
        self.authorize_registration(actor, &new_user.username).await?;
        Ok(self
            .user_repo
            .insert(new_user.as_superuser(requested_superuser))
            .await?)
    }

    async fn authorize_registration(
        &self,
        actor: Option<&AuthenticatedUser>,
        username: &Username,
    ) -> ApplicationResult<()> {
        let requester =
            actor.ok_or_else(|| ApplicationError::unauthorized("authentication required"))?;
        crate::application::access::ensure_superuser(requester)?;
        if self.user_repo.find_by_username(username).await?.is_some() {
            return Err(ApplicationError::conflict("username already exists"));
        }
        Ok(())
    }
}
