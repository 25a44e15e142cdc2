//! Identity of the authenticated requester.

use crate::domain::{Account, AccountId, Role, Username};

/// Authenticated caller resolved once per request by an inbound adapter.
///
/// Every lifecycle and access-control operation receives this value
/// explicitly; nothing in the domain reads the caller from ambient state.
///
/// # Examples
/// ```
/// use account_service::domain::{AccountId, CallerContext, Role, Username};
///
/// let caller = CallerContext::new(
///     AccountId::random(),
///     Username::new("bob").expect("valid"),
///     Role::Admin,
/// );
/// assert!(caller.is_admin());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerContext {
    account_id: AccountId,
    username: Username,
    role: Role,
}

impl CallerContext {
    /// Build a caller context from an already-authenticated identity.
    pub fn new(account_id: AccountId, username: Username, role: Role) -> Self {
        Self {
            account_id,
            username,
            role,
        }
    }

    /// Derive the caller context for the owner of `account`.
    pub fn for_account(account: &Account) -> Self {
        Self::new(account.id(), account.username().clone(), account.role())
    }

    /// Store id of the requester's account.
    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    /// Username of the requester.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Role derived from the requester's account.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Whether the requester holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
