//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call it to authenticate credentials and to resolve the
//! caller behind an existing session, without importing persistence.

use async_trait::async_trait;

use crate::domain::{AccountId, CallerContext, Error, LoginCredentials};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated caller.
    ///
    /// Unknown usernames and wrong passwords both fail with
    /// [`crate::domain::ErrorCode::Unauthorized`].
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<CallerContext, Error>;

    /// Rebuild the caller context for the account id held by a session.
    ///
    /// The username and role are re-read from the store; `None` means the
    /// account is gone, even if its username has since been registered again.
    async fn resolve_caller(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<CallerContext>, Error>;
}
