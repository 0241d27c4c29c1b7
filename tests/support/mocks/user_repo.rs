// tests/support/mocks/user_repo.rs
use async_trait::async_trait;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};
use tabletop_catalog::domain::{
    errors::{DomainError, DomainResult},
    user::{
        NewUser, ProfileUpdate, User, UserAccount, UserId, UserProfile, UserRepository, Username,
    },
};

/// Accounts with sequential ids starting at 1.
#[derive(Default)]
pub struct InMemoryUserRepo {
    accounts: Mutex<Vec<UserAccount>>,
    stale_count: AtomicBool,
}

impl InMemoryUserRepo {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn account(&self, username: &str) -> Option<UserAccount> {
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.user.username.as_str() == username)
            .cloned()
    }

    /// Makes `count` report no accounts, as if another registration
    /// committed right after it was read.
    pub fn serve_stale_count(&self) {
        self.stale_count.store(true, Ordering::SeqCst);
    }

    pub fn superusers(&self) -> Vec<String> {
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.user.is_superuser)
            .map(|a| a.user.username.to_string())
            .collect()
    }

    fn push(accounts: &mut Vec<UserAccount>, new_user: NewUser) -> DomainResult<UserAccount> {
        if accounts.iter().any(|a| a.user.username == new_user.username) {
            return Err(DomainError::Conflict("username already exists".into()));
        }
        let id = UserId::new(accounts.len() as i64 + 1)?;
        let account = UserAccount {
            user: User {
                id,
                username: new_user.username,
                password_hash: new_user.password_hash,
                first_name: new_user.first_name,
                last_name: new_user.last_name,
                is_superuser: new_user.is_superuser,
                is_active: new_user.is_active,
                created_at: new_user.created_at,
            },
            profile: UserProfile {
                user_id: id,
                timezone: new_user.timezone,
            },
        };
        accounts.push(account.clone());
        Ok(account)
    }

    pub fn deactivate(&self, username: &str) {
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(account) = accounts
            .iter_mut()
            .find(|a| a.user.username.as_str() == username)
        {
            account.user.is_active = false;
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepo {
    async fn count(&self) -> DomainResult<u64> {
        if self.stale_count.load(Ordering::SeqCst) {
            return Ok(0);
        }
        Ok(self.accounts.lock().unwrap().len() as u64)
    }

    async fn insert(&self, new_user: NewUser) -> DomainResult<UserAccount> {
        let mut accounts = self.accounts.lock().unwrap();
        Self::push(&mut accounts, new_user)
    }

    async fn insert_first(&self, new_user: NewUser) -> DomainResult<Option<UserAccount>> {
        let mut accounts = self.accounts.lock().unwrap();
        if !accounts.is_empty() {
            return Ok(None);
        }
        Self::push(&mut accounts, new_user).map(Some)
    }

    async fn find_by_username(&self, username: &Username) -> DomainResult<Option<User>> {
        Ok(self.account(username.as_str()).map(|a| a.user))
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.user.id == id)
            .map(|a| a.user.clone()))
    }

    async fn find_account(&self, username: &Username) -> DomainResult<Option<UserAccount>> {
        Ok(self.account(username.as_str()))
    }

    async fn update_profile(&self, update: ProfileUpdate) -> DomainResult<UserAccount> {
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .iter_mut()
            .find(|a| a.user.id == update.user_id)
            .ok_or_else(|| DomainError::NotFound("user not found".into()))?;
        account.user.first_name = update.first_name;
        account.user.last_name = update.last_name;
        account.profile.timezone = update.timezone;
        Ok(account.clone())
    }
}
