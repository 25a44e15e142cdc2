//! Admin notification fan-out for account lifecycle events.
//!
//! Every mutating lifecycle operation ends by calling [`AdminNotifier::notify`].
//! The admin set is re-read from the store on each call and one message is
//! handed to the sink per admin. Failures are logged and counted but never
//! reach the caller; the triggering mutation has already been committed.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::ports::{AccountRepository, NotificationSink};
use crate::domain::{Account, EmailAddress};

/// Placeholder rendered instead of the password hash in message bodies.
pub const REDACTED_HASH: &str = "[redacted]";

/// Lifecycle event that triggered a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleAction {
    /// An account was registered.
    Created,
    /// An account was updated.
    Updated,
    /// An account was deleted.
    Deleted,
}

impl LifecycleAction {
    /// Word used in message subjects and bodies.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Updated => "Updated",
            Self::Deleted => "Deleted",
        }
    }
}

impl fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outbound message. Built per admin and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    /// Admin email address.
    pub recipient: EmailAddress,
    /// Short summary line.
    pub subject: String,
    /// Message text; may contain HTML.
    pub body: String,
}

/// Controls what account data leaks into message bodies.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NotificationPolicy {
    /// Render the stored password hash instead of [`REDACTED_HASH`].
    pub expose_password_hash: bool,
}

impl NotificationPolicy {
    /// Build the message sent to `recipient` about `account`.
    ///
    /// # Examples
    /// ```
    /// use account_service::domain::{
    ///     AccountId, EmailAddress, LifecycleAction, NewAccount, NotificationPolicy,
    ///     PasswordHash, Role, Username,
    /// };
    ///
    /// let account = NewAccount {
    ///     username: Username::new("carol").unwrap(),
    ///     password_hash: PasswordHash::new("$argon2id$abc"),
    ///     email: EmailAddress::new("c@x.com").unwrap(),
    ///     first_name: None,
    ///     last_name: None,
    ///     role: Role::User,
    /// }
    /// .with_id(AccountId::random());
    /// let admin = EmailAddress::new("bob@x.com").unwrap();
    ///
    /// let message = NotificationPolicy::default().message(LifecycleAction::Created, &account, &admin);
    /// assert_eq!(message.subject, "Created user carol");
    /// assert_eq!(
    ///     message.body,
    ///     "Created user with username - carol, password - [redacted], email - c@x.com"
    /// );
    /// ```
    pub fn message(
        &self,
        action: LifecycleAction,
        account: &Account,
        recipient: &EmailAddress,
    ) -> NotificationMessage {
        let password = if self.expose_password_hash {
            account.password_hash().as_str()
        } else {
            REDACTED_HASH
        };
        NotificationMessage {
            recipient: recipient.clone(),
            subject: format!("{action} user {}", account.username()),
            body: format!(
                "{action} user with username - {}, password - {password}, email - {}",
                account.username(),
                account.email(),
            ),
        }
    }
}

/// Outcome counters for one fan-out.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FanOutReport {
    /// Admins a message was built for.
    pub attempted: usize,
    /// Messages the sink accepted.
    pub delivered: usize,
    /// Messages the sink rejected.
    pub failed: usize,
}

/// Sends one message per admin account through a [`NotificationSink`].
pub struct AdminNotifier<R: ?Sized, S: ?Sized> {
    accounts: Arc<R>,
    sink: Arc<S>,
    policy: NotificationPolicy,
}

impl<R: ?Sized, S: ?Sized> Clone for AdminNotifier<R, S> {
    fn clone(&self) -> Self {
        Self {
            accounts: Arc::clone(&self.accounts),
            sink: Arc::clone(&self.sink),
            policy: self.policy,
        }
    }
}

impl<R, S> AdminNotifier<R, S>
where
    R: AccountRepository + ?Sized,
    S: NotificationSink + ?Sized,
{
    /// Create a notifier reading admins from `accounts`.
    pub fn new(accounts: Arc<R>, sink: Arc<S>, policy: NotificationPolicy) -> Self {
        Self {
            accounts,
            sink,
            policy,
        }
    }

    /// Notify every admin about `action` on `account`.
    ///
    /// Runs sequentially in store iteration order. Never fails.
    pub async fn notify(&self, action: LifecycleAction, account: &Account) -> FanOutReport {
        let mut report = FanOutReport::default();
        let all = match self.accounts.find_all().await {
            Ok(all) => all,
            Err(error) => {
                warn!(
                    %error,
                    action = %action,
                    username = %account.username(),
                    "could not enumerate admins for notification"
                );
                return report;
            }
        };

        for admin in all.iter().filter(|candidate| candidate.role().is_admin()) {
            report.attempted += 1;
            let message = self.policy.message(action, account, admin.email());
            match self.sink.deliver(&message).await {
                Ok(()) => {
                    report.delivered += 1;
                    debug!(recipient = %admin.email(), action = %action, "admin notified");
                }
                Err(error) => {
                    report.failed += 1;
                    warn!(
                        %error,
                        recipient = %admin.email(),
                        action = %action,
                        "admin notification failed"
                    );
                }
            }
        }
        report
    }
}
