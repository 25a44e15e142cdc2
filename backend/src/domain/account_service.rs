//! Account lifecycle engine.
//!
//! Implements [`AccountLifecycle`] on top of the driven ports. Every operation
//! that targets one account resolves it first (`NotFound`), then evaluates
//! [`AccessControl`] (`Forbidden`), and only then touches the store or the
//! notifier.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    AccountLifecycle, AccountPatch, AccountRepository, AccountRepositoryError,
    NotificationSink, PasswordHasher, PasswordHasherError, RegistrationRequest,
};
use crate::domain::{
    AccessControl, Account, AccountId, AdminNotifier, CallerContext, Error, LifecycleAction,
    NewAccount, NotificationPolicy, Password, PasswordHash, Role, Username,
};

/// Lifecycle service implementing the [`AccountLifecycle`] driving port.
pub struct AccountService<R: ?Sized, H: ?Sized, S: ?Sized> {
    accounts: Arc<R>,
    hasher: Arc<H>,
    notifier: AdminNotifier<R, S>,
    access: AccessControl,
}

impl<R, H, S> AccountService<R, H, S>
where
    R: AccountRepository + ?Sized,
    H: PasswordHasher + ?Sized + 'static,
    S: NotificationSink + ?Sized,
{
    /// Create a new service over the given adapters.
    pub fn new(
        accounts: Arc<R>,
        hasher: Arc<H>,
        sink: Arc<S>,
        policy: NotificationPolicy,
    ) -> Self {
        let notifier = AdminNotifier::new(Arc::clone(&accounts), sink, policy);
        Self {
            accounts,
            hasher,
            notifier,
            access: AccessControl,
        }
    }

    fn map_repository_error(error: AccountRepositoryError) -> Error {
        match error {
            AccountRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("account repository unavailable: {message}"))
            }
            AccountRepositoryError::Query { message } => {
                Error::internal(format!("account repository error: {message}"))
            }
            AccountRepositoryError::UsernameTaken { .. } => Self::username_conflict(),
            AccountRepositoryError::EmailTaken { .. } => Self::email_conflict(),
            AccountRepositoryError::Missing { .. } => Self::account_not_found(),
        }
    }

    fn map_hasher_error(error: PasswordHasherError) -> Error {
        Error::internal(format!("password hashing failed: {error}"))
    }

    fn username_conflict() -> Error {
        Error::conflict("username already exists").with_details(json!({ "field": "username" }))
    }

    fn email_conflict() -> Error {
        Error::conflict("email already exists").with_details(json!({ "field": "email" }))
    }

    fn account_not_found() -> Error {
        Error::not_found("account not found")
    }

    /// Argon2 is CPU-bound, so hashing runs on the blocking pool.
    async fn hash(&self, password: &Password) -> Result<PasswordHash, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(Self::map_hasher_error)
    }

    async fn fetch(&self, id: &AccountId) -> Result<Account, Error> {
        self.accounts
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(Self::account_not_found)
    }

    async fn fetch_permitted(&self, id: &AccountId, caller: &CallerContext) -> Result<Account, Error> {
        let account = self.fetch(id).await?;
        self.access.ensure_permitted(caller, &account)?;
        Ok(account)
    }

    async fn ensure_unique(&self, request: &RegistrationRequest) -> Result<(), Error> {
        if self
            .accounts
            .exists_by_username(&request.username)
            .await
            .map_err(Self::map_repository_error)?
        {
            return Err(Self::username_conflict());
        }
        if self
            .accounts
            .exists_by_email(&request.email)
            .await
            .map_err(Self::map_repository_error)?
        {
            return Err(Self::email_conflict());
        }
        Ok(())
    }

    async fn announce(&self, action: LifecycleAction, account: &Account) {
        let report = self.notifier.notify(action, account).await;
        debug!(
            action = %action,
            username = %account.username(),
            attempted = report.attempted,
            delivered = report.delivered,
            failed = report.failed,
            "admin fan-out finished"
        );
    }
}

#[async_trait]
impl<R, H, S> AccountLifecycle for AccountService<R, H, S>
where
    R: AccountRepository + ?Sized,
    H: PasswordHasher + ?Sized + 'static,
    S: NotificationSink + ?Sized,
{
    async fn register(&self, request: RegistrationRequest) -> Result<Account, Error> {
        self.ensure_unique(&request).await?;
        if request.password.is_empty() {
            return Err(Error::invalid_request("password must not be empty")
                .with_details(json!({ "field": "password" })));
        }

        if let Some(requested) = request.requested_role.filter(|role| *role != Role::User) {
            debug!(username = %request.username, requested = %requested, "ignoring requested role");
        }
        let new_account = NewAccount {
            password_hash: self.hash(&request.password).await?,
            username: request.username,
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            role: Role::User,
        };
        let created = self
            .accounts
            .insert(new_account)
            .await
            .map_err(Self::map_repository_error)?;
        info!(username = %created.username(), "account created");

        self.announce(LifecycleAction::Created, &created).await;
        Ok(created)
    }

    async fn get(&self, id: &AccountId, caller: &CallerContext) -> Result<Account, Error> {
        self.fetch_permitted(id, caller).await
    }

    async fn get_by_username(
        &self,
        username: &Username,
        caller: &CallerContext,
    ) -> Result<Account, Error> {
        let account = self
            .accounts
            .find_by_username(username)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(Self::account_not_found)?;
        self.access.ensure_permitted(caller, &account)?;
        Ok(account)
    }

    async fn list_all(&self, caller: &CallerContext) -> Result<Vec<Account>, Error> {
        self.access.ensure_admin(caller)?;
        self.accounts
            .find_all()
            .await
            .map_err(Self::map_repository_error)
    }

    async fn update(
        &self,
        id: &AccountId,
        patch: AccountPatch,
        caller: &CallerContext,
    ) -> Result<Account, Error> {
        let current = self.fetch_permitted(id, caller).await?;

        let AccountPatch {
            email,
            first_name,
            last_name,
            password,
        } = patch;
        let mut changed = current.with_profile(email, first_name, last_name);
        if let Some(password) = password.filter(|password| !password.is_empty()) {
            changed = changed.with_password_hash(self.hash(&password).await?);
        }

        let updated = self
            .accounts
            .update(&changed)
            .await
            .map_err(Self::map_repository_error)?;
        info!(username = %updated.username(), "account updated");

        self.announce(LifecycleAction::Updated, &updated).await;
        Ok(updated)
    }

    async fn delete(&self, id: &AccountId, caller: &CallerContext) -> Result<(), Error> {
        let snapshot = self.fetch_permitted(id, caller).await?;
        self.accounts
            .delete(id)
            .await
            .map_err(Self::map_repository_error)?;
        info!(username = %snapshot.username(), "account deleted");

        self.announce(LifecycleAction::Deleted, &snapshot).await;
        Ok(())
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
