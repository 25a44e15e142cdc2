//! Driven port for account persistence (the credential store).
//!
//! Adapters enforce username and email uniqueness themselves and report
//! violations through dedicated error variants, so the lifecycle engine can
//! treat a race lost at write time exactly like a duplicate found up front.

use async_trait::async_trait;

use crate::domain::{Account, AccountId, EmailAddress, NewAccount, Username};

use super::define_port_error;

define_port_error! {
    /// Errors raised by account repository adapters.
    pub enum AccountRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "account repository query failed: {message}",
        /// Another account already uses this username.
        UsernameTaken { username: String } => "username already exists: {username}",
        /// Another account already uses this email address.
        EmailTaken { email: String } => "email already exists: {email}",
        /// The account to update or delete no longer exists.
        Missing { id: String } => "account not found: {id}",
    }
}

/// Key-indexed account store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountRepositoryError>;

    /// Fetch an account by username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountRepositoryError>;

    /// Whether any account uses `username`.
    async fn exists_by_username(&self, username: &Username) -> Result<bool, AccountRepositoryError>;

    /// Whether any account uses `email`.
    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, AccountRepositoryError>;

    /// Persist a new account, assigning its identifier.
    ///
    /// Fails with [`AccountRepositoryError::UsernameTaken`] or
    /// [`AccountRepositoryError::EmailTaken`] when a uniqueness constraint
    /// rejects the row.
    async fn insert(&self, account: NewAccount) -> Result<Account, AccountRepositoryError>;

    /// Overwrite the mutable fields of an existing account.
    async fn update(&self, account: &Account) -> Result<Account, AccountRepositoryError>;

    /// Remove an account permanently.
    async fn delete(&self, id: &AccountId) -> Result<(), AccountRepositoryError>;

    /// Every stored account in store iteration order.
    async fn find_all(&self) -> Result<Vec<Account>, AccountRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn uniqueness_errors_name_the_offending_value() {
        assert_eq!(
            AccountRepositoryError::username_taken("carol").to_string(),
            "username already exists: carol"
        );
        assert_eq!(
            AccountRepositoryError::email_taken("c@x.com").to_string(),
            "email already exists: c@x.com"
        );
    }
}
