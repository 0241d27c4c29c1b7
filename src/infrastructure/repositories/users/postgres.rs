// src/infrastructure/repositories/users/postgres.rs
use super::super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::{
    NewUser, PasswordHash, PersonName, ProfileUpdate, Timezone, User, UserAccount, UserId,
    UserProfile, UserRepository, Username,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool};

const USER_COLUMNS: &str =
    "id, username, password_hash, first_name, last_name, is_superuser, is_active, created_at";

const ACCOUNT_SELECT: &str = "SELECT u.id, u.username, u.password_hash, u.first_name, u.last_name,
        u.is_superuser, u.is_active, u.created_at, p.timezone
     FROM users u JOIN user_profiles p ON p.user_id = u.id";

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    is_superuser: bool,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::new(row.id)?,
            username: Username::new(row.username)?,
            password_hash: PasswordHash::new(row.password_hash)?,
            first_name: PersonName::new(row.first_name)?,
            last_name: PersonName::new(row.last_name)?,
            is_superuser: row.is_superuser,
            is_active: row.is_active,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct AccountRow {
    #[sqlx(flatten)]
    user: UserRow,
    timezone: String,
}

impl TryFrom<AccountRow> for UserAccount {
    type Error = DomainError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let user = User::try_from(row.user)?;
        let timezone = Timezone::new(&row.timezone).map_err(|_| {
            DomainError::Persistence(format!("stored time zone '{}' is unknown", row.timezone))
        })?;
        Ok(UserAccount {
            profile: UserProfile {
                user_id: user.id,
                timezone,
            },
            user,
        })
    }
}

/// Writes the user row and its profile on `conn`.
async fn insert_account(conn: &mut PgConnection, new_user: NewUser) -> DomainResult<UserAccount> {
    let NewUser {
        username,
        password_hash,
        first_name,
        last_name,
        is_superuser,
        is_active,
        timezone,
        created_at,
    } = new_user;

    let row = sqlx::query_as::<_, UserRow>(&format!(
        "INSERT INTO users (username, password_hash, first_name, last_name, is_superuser, is_active, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING {USER_COLUMNS}"
    ))
    .bind(username.as_str())
    .bind(password_hash.as_str())
    .bind(first_name.as_str())
    .bind(last_name.as_str())
    .bind(is_superuser)
    .bind(is_active)
    .bind(created_at)
    .fetch_one(&mut *conn)
    .await
    .map_err(map_sqlx)?;

    sqlx::query("INSERT INTO user_profiles (user_id, timezone) VALUES ($1, $2)")
        .bind(row.id)
        .bind(timezone.name())
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;

    let user = User::try_from(row)?;
    Ok(UserAccount {
        profile: UserProfile {
            user_id: user.id,
            timezone,
        },
        user,
    })
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn count(&self) -> DomainResult<u64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(1) FROM users")
            .fetch_one(&self.pool)
            .await
            .map(|count| count as u64)
            .map_err(map_sqlx)
    }

    async fn insert(&self, new_user: NewUser) -> DomainResult<UserAccount> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        let account = insert_account(&mut tx, new_user).await?;
        tx.commit().await.map_err(map_sqlx)?;
        Ok(account)
    }

    async fn insert_first(&self, new_user: NewUser) -> DomainResult<Option<UserAccount>> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        // Blocks concurrent inserts until this transaction ends.
        sqlx::query("LOCK TABLE users IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        let existing: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users)")
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        if existing {
            return Ok(None);
        }

        let account = insert_account(&mut tx, new_user).await?;
        tx.commit().await.map_err(map_sqlx)?;
        Ok(Some(account))
    }

    async fn find_by_username(&self, username: &Username) -> DomainResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(User::try_from).transpose()
    }

    async fn find_account(&self, username: &Username) -> DomainResult<Option<UserAccount>> {
        let row =
            sqlx::query_as::<_, AccountRow>(&format!("{ACCOUNT_SELECT} WHERE u.username = $1"))
                .bind(username.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx)?;

        row.map(UserAccount::try_from).transpose()
    }

    async fn update_profile(&self, update: ProfileUpdate) -> DomainResult<UserAccount> {
        let ProfileUpdate {
            user_id,
            first_name,
            last_name,
            timezone,
        } = update;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users SET first_name = $1, last_name = $2 WHERE id = $3 RETURNING {USER_COLUMNS}"
        ))
        .bind(first_name.as_str())
        .bind(last_name.as_str())
        .bind(i64::from(user_id))
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound("user not found".into()))?;

        sqlx::query(
            "INSERT INTO user_profiles (user_id, timezone) VALUES ($1, $2)
             ON CONFLICT (user_id) DO UPDATE SET timezone = EXCLUDED.timezone",
        )
        .bind(i64::from(user_id))
        .bind(timezone.name())
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;

        let user = User::try_from(row)?;
        Ok(UserAccount {
            profile: UserProfile {
                user_id: user.id,
                timezone,
            },
            user,
        })
    }
}
