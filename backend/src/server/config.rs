//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};

use crate::domain::NotificationPolicy;
use crate::domain::ports::{AccountRepository, NotificationSink, PasswordHasher};
use crate::outbound::hashing::Argon2PasswordHasher;
use crate::outbound::notification::TracingNotificationSink;
use crate::outbound::persistence::InMemoryAccountRepository;

/// Builder-style configuration for creating the HTTP server.
///
/// Defaults to the in-memory store, Argon2id hashing, and a log-only
/// notification sink; `with_*` swaps in other adapters.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) accounts: Arc<dyn AccountRepository>,
    pub(crate) hasher: Arc<dyn PasswordHasher>,
    pub(crate) notifications: Arc<dyn NotificationSink>,
    pub(crate) expose_password_hash: bool,
}

impl ServerConfig {
    /// Construct a server configuration with the default adapters.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            accounts: Arc::new(InMemoryAccountRepository::new()),
            hasher: Arc::new(Argon2PasswordHasher::default()),
            notifications: Arc::new(TracingNotificationSink),
            expose_password_hash: false,
        }
    }

    /// Use `accounts` as the account store.
    #[must_use]
    pub fn with_accounts(mut self, accounts: Arc<dyn AccountRepository>) -> Self {
        self.accounts = accounts;
        self
    }

    /// Use `hasher` for password hashing and verification.
    #[must_use]
    pub fn with_hasher(mut self, hasher: Arc<dyn PasswordHasher>) -> Self {
        self.hasher = hasher;
        self
    }

    /// Deliver admin notifications through `sink`.
    #[must_use]
    pub fn with_notifications(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.notifications = sink;
        self
    }

    /// Render stored password hashes in responses and notification bodies.
    #[must_use]
    pub fn with_expose_password_hash(mut self, expose: bool) -> Self {
        self.expose_password_hash = expose;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    pub(crate) fn notification_policy(&self) -> NotificationPolicy {
        NotificationPolicy {
            expose_password_hash: self.expose_password_hash,
        }
    }
}
