use crate::domain::errors::DomainResult;
use crate::domain::user::entity::{NewUser, ProfileUpdate, User, UserAccount};
use crate::domain::user::value_objects::{UserId, Username};
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn count(&self) -> DomainResult<u64>;

    /// Creates the user and its profile atomically.
    async fn insert(&self, new_user: NewUser) -> DomainResult<UserAccount>;

    /// Inserts `new_user` only if no account exists yet, deciding under a
    /// lock so concurrent first registrations cannot both succeed.
    async fn insert_first(&self, new_user: NewUser) -> DomainResult<Option<UserAccount>>;

    async fn find_by_username(&self, username: &Username) -> DomainResult<Option<User>>;

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>>;

    async fn find_account(&self, username: &Username) -> DomainResult<Option<UserAccount>>;

    async fn update_profile(&self, update: ProfileUpdate) -> DomainResult<UserAccount>;
}
