use crate::domain::user::{User, UserAccount};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_superuser: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id.into(),
            username: user.username.to_string(),
            first_name: user.first_name.into(),
            last_name: user.last_name.into(),
            is_superuser: user.is_superuser,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// A user together with their profile preferences.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDetailDto {
    #[serde(flatten)]
    pub user: UserDto,
    /// IANA time zone name.
    pub timezone: String,
}

impl From<UserAccount> for UserDetailDto {
    fn from(account: UserAccount) -> Self {
        Self {
            timezone: account.profile.timezone.to_string(),
            user: account.user.into(),
        }
    }
}
