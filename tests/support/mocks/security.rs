// tests/support/mocks/security.rs
use async_trait::async_trait;
use chrono::Duration;
use tabletop_catalog::application::{
    ApplicationResult,
    dto::{AuthTokenDto, AuthenticatedUser, TokenSubject},
    error::ApplicationError,
    ports::security::{PasswordHasher, TokenManager},
};
use tabletop_catalog::domain::user::UserId;

pub const ADMIN_TOKEN: &str = "admin-token";
pub const MEMBER_TOKEN: &str = "member-token";
pub const OTHER_TOKEN: &str = "other-token";
pub const EXPIRED_TOKEN: &str = "expired-token";

fn authenticated(id: i64, username: &str, is_superuser: bool) -> AuthenticatedUser {
    let now = super::time::fixed_now();
    AuthenticatedUser {
        id: UserId::new(id).expect("invalid user id"),
        username: username.into(),
        is_superuser,
        issued_at: now,
        expires_at: now + Duration::hours(1),
    }
}

/// Superuser with id 1.
pub fn admin_user() -> AuthenticatedUser {
    authenticated(1, "admin", true)
}

/// Regular user with id 2.
pub fn member_user() -> AuthenticatedUser {
    authenticated(2, "member", false)
}

/// Regular user with id 3.
pub fn other_user() -> AuthenticatedUser {
    authenticated(3, "other", false)
}

/// Maps fixed tokens to fixed identities and issues `token-for-<username>`.
#[derive(Clone, Debug, Default)]
pub struct DummyTokenManager;

#[async_trait]
impl TokenManager for DummyTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let now = super::time::fixed_now();
        Ok(AuthTokenDto {
            token: format!("token-for-{}", subject.username),
            issued_at: now,
            expires_at: now + Duration::hours(1),
            expires_in: 3600,
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        match token {
            ADMIN_TOKEN => Ok(admin_user()),
            MEMBER_TOKEN => Ok(member_user()),
            OTHER_TOKEN => Ok(other_user()),
            EXPIRED_TOKEN => Err(ApplicationError::unauthorized("token expired")),
            _ => Err(ApplicationError::unauthorized("invalid token")),
        }
    }
}

/// Stores `hash::<password>` so verification can be checked.
#[derive(Clone, Debug, Default)]
pub struct DummyPasswordHasher;

#[async_trait]
impl PasswordHasher for DummyPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(format!("hash::{password}"))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        if expected_hash == format!("hash::{password}") {
            Ok(())
        } else {
            Err(ApplicationError::unauthorized("invalid credentials"))
        }
    }
}
