// src/domain/user/entity.rs
use crate::domain::user::value_objects::{PasswordHash, PersonName, Timezone, UserId, Username};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub password_hash: PasswordHash,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub is_superuser: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Per-user preferences, one per account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub user_id: UserId,
    pub timezone: Timezone,
}

#[derive(Debug, Clone)]
pub struct UserAccount {
    pub user: User,
    pub profile: UserProfile,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub password_hash: PasswordHash,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub is_superuser: bool,
    pub is_active: bool,
    pub timezone: Timezone,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn new(
        username: Username,
        password_hash: PasswordHash,
        timezone: Timezone,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            username,
            password_hash,
            first_name: PersonName::default(),
            last_name: PersonName::default(),
            is_superuser: false,
            is_active: true,
            timezone,
            created_at,
        }
    }

    pub fn with_names(mut self, first_name: PersonName, last_name: PersonName) -> Self {
        self.first_name = first_name;
        self.last_name = last_name;
        self
    }

    pub fn as_superuser(mut self, is_superuser: bool) -> Self {
        self.is_superuser = is_superuser;
        self
    }
}

/// Names and time zone are written together.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub user_id: UserId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub timezone: Timezone,
}
