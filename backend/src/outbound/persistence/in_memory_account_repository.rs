//! Process-local `AccountRepository` used when no database is configured.
//!
//! Accounts live in insertion order behind a tokio `RwLock`. Uniqueness is
//! checked under the write lock so concurrent registrations cannot both win.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{AccountRepository, AccountRepositoryError};
use crate::domain::{Account, AccountId, EmailAddress, NewAccount, Username};

/// In-memory account store.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: RwLock<Vec<Account>>,
}

impl InMemoryAccountRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn email_in_use(accounts: &[Account], email: &EmailAddress, except: Option<AccountId>) -> bool {
    accounts
        .iter()
        .any(|account| account.email() == email && Some(account.id()) != except)
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountRepositoryError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().find(|account| account.id() == *id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .iter()
            .find(|account| account.username() == username)
            .cloned())
    }

    async fn exists_by_username(&self, username: &Username) -> Result<bool, AccountRepositoryError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().any(|account| account.username() == username))
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, AccountRepositoryError> {
        let accounts = self.accounts.read().await;
        Ok(email_in_use(&accounts, email, None))
    }

    async fn insert(&self, account: NewAccount) -> Result<Account, AccountRepositoryError> {
        let mut accounts = self.accounts.write().await;
        if accounts
            .iter()
            .any(|existing| existing.username() == &account.username)
        {
            return Err(AccountRepositoryError::username_taken(account.username));
        }
        if email_in_use(&accounts, &account.email, None) {
            return Err(AccountRepositoryError::email_taken(account.email));
        }
        let created = account.with_id(AccountId::random());
        accounts.push(created.clone());
        Ok(created)
    }

    async fn update(&self, account: &Account) -> Result<Account, AccountRepositoryError> {
        let mut accounts = self.accounts.write().await;
        if email_in_use(&accounts, account.email(), Some(account.id())) {
            return Err(AccountRepositoryError::email_taken(account.email().clone()));
        }
        let slot = accounts
            .iter_mut()
            .find(|existing| existing.id() == account.id())
            .ok_or_else(|| AccountRepositoryError::missing(account.id().to_string()))?;
        *slot = account.clone();
        Ok(account.clone())
    }

    async fn delete(&self, id: &AccountId) -> Result<(), AccountRepositoryError> {
        let mut accounts = self.accounts.write().await;
        let before = accounts.len();
        accounts.retain(|account| account.id() != *id);
        if accounts.len() == before {
            return Err(AccountRepositoryError::missing(id.to_string()));
        }
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Account>, AccountRepositoryError> {
        Ok(self.accounts.read().await.clone())
    }
}
