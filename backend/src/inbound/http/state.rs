//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountLifecycle, LoginService};

/// How account projections are rendered in responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResponsePolicy {
    /// Include the stored password hash in account payloads. Off by default;
    /// exists for clients of the legacy API that still read the field.
    pub expose_password_hash: bool,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountLifecycle>,
    pub login: Arc<dyn LoginService>,
    pub responses: ResponsePolicy,
}

impl HttpState {
    /// Construct state from the driving ports.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use account_service::domain::{
    ///     AccountLoginService, AccountService, NotificationPolicy,
    /// };
    /// use account_service::inbound::http::state::{HttpState, ResponsePolicy};
    /// use account_service::outbound::hashing::Argon2PasswordHasher;
    /// use account_service::outbound::notification::TracingNotificationSink;
    /// use account_service::outbound::persistence::InMemoryAccountRepository;
    ///
    /// let store = Arc::new(InMemoryAccountRepository::new());
    /// let hasher = Arc::new(Argon2PasswordHasher::default());
    /// let accounts = AccountService::new(
    ///     store.clone(),
    ///     hasher.clone(),
    ///     Arc::new(TracingNotificationSink),
    ///     NotificationPolicy::default(),
    /// );
    /// let login = AccountLoginService::new(store, hasher);
    /// let state = HttpState::new(Arc::new(accounts), Arc::new(login), ResponsePolicy::default());
    /// let _accounts = state.accounts.clone();
    /// ```
    pub fn new(
        accounts: Arc<dyn AccountLifecycle>,
        login: Arc<dyn LoginService>,
        responses: ResponsePolicy,
    ) -> Self {
        Self {
            accounts,
            login,
            responses,
        }
    }
}
