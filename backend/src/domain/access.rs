//! Access control decisions for account operations.
//!
//! The evaluator is pure: it looks only at the caller and the target it is
//! handed. Callers must check that the target exists first so that a missing
//! account reports `NotFound` before any authorization outcome.

use crate::domain::{Account, CallerContext, Error, Username};

/// Stateless permit/deny evaluator.
#[derive(Debug, Default, Clone, Copy)]
pub struct AccessControl;

impl AccessControl {
    /// Self-or-admin rule for single-account operations.
    ///
    /// # Examples
    /// ```
    /// use account_service::domain::{AccessControl, AccountId, CallerContext, Role, Username};
    ///
    /// let alice = CallerContext::new(AccountId::random(), Username::new("alice").unwrap(), Role::User);
    /// let bob = CallerContext::new(AccountId::random(), Username::new("bob").unwrap(), Role::User);
    /// assert!(AccessControl.permit_username(&alice, alice.username()));
    /// assert!(!AccessControl.permit_username(&alice, bob.username()));
    /// ```
    pub fn permit(&self, caller: &CallerContext, target: &Account) -> bool {
        self.permit_username(caller, target.username())
    }

    /// [`AccessControl::permit`] keyed directly by the target username.
    pub fn permit_username(&self, caller: &CallerContext, target: &Username) -> bool {
        caller.is_admin() || caller.username() == target
    }

    /// Admin-only rule for collection operations.
    pub fn permit_admin_only(&self, caller: &CallerContext) -> bool {
        caller.is_admin()
    }

    /// Return a `Forbidden` error unless [`AccessControl::permit`] holds.
    pub fn ensure_permitted(&self, caller: &CallerContext, target: &Account) -> Result<(), Error> {
        if self.permit(caller, target) {
            Ok(())
        } else {
            Err(Error::forbidden("access denied"))
        }
    }

    /// Return a `Forbidden` error unless the caller is an admin.
    pub fn ensure_admin(&self, caller: &CallerContext) -> Result<(), Error> {
        if self.permit_admin_only(caller) {
            Ok(())
        } else {
            Err(Error::forbidden("admin access required"))
        }
    }
}
