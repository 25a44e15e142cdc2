//! Driving port for the account lifecycle operations.

use async_trait::async_trait;

use crate::domain::{
    Account, AccountId, CallerContext, EmailAddress, Error, Password, Role, Username,
};

/// Fields supplied when registering a new account.
///
/// `requested_role` is accepted so callers can pass through whatever the
/// client sent; registration always stores [`Role::User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    /// Desired unique login name.
    pub username: Username,
    /// Initial plaintext password; must be non-empty.
    pub password: Password,
    /// Desired unique contact address.
    pub email: EmailAddress,
    /// Optional given name.
    pub first_name: Option<String>,
    /// Optional family name.
    pub last_name: Option<String>,
    /// Role requested by the client. Ignored.
    pub requested_role: Option<Role>,
}

/// Mutable account fields applied by an update.
///
/// `email` and both names are applied unconditionally. `password` replaces
/// the stored hash only when present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountPatch {
    /// Replacement email address.
    pub email: EmailAddress,
    /// Replacement given name.
    pub first_name: Option<String>,
    /// Replacement family name.
    pub last_name: Option<String>,
    /// Optional new password.
    pub password: Option<Password>,
}

/// Boundary operations of the account lifecycle engine.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountLifecycle: Send + Sync {
    /// Create an account with role [`Role::User`] and notify every admin.
    async fn register(&self, request: RegistrationRequest) -> Result<Account, Error>;

    /// Fetch one account the caller may see.
    async fn get(&self, id: &AccountId, caller: &CallerContext) -> Result<Account, Error>;

    /// Fetch one account by username.
    async fn get_by_username(
        &self,
        username: &Username,
        caller: &CallerContext,
    ) -> Result<Account, Error>;

    /// List every account. Admin only.
    async fn list_all(&self, caller: &CallerContext) -> Result<Vec<Account>, Error>;

    /// Apply a patch and notify every admin.
    async fn update(
        &self,
        id: &AccountId,
        patch: AccountPatch,
        caller: &CallerContext,
    ) -> Result<Account, Error>;

    /// Hard-delete an account and notify every admin.
    async fn delete(&self, id: &AccountId, caller: &CallerContext) -> Result<(), Error>;
}
