//! Wires the domain services behind the HTTP driving ports.

use std::sync::Arc;

use crate::domain::{AccountLoginService, AccountService};
use crate::inbound::http::state::{HttpState, ResponsePolicy};

use super::ServerConfig;

/// Build the handler state from the configured adapters.
///
/// The lifecycle engine and the login service share one store so a session
/// sees registrations and deletions immediately.
pub(crate) fn build_http_state(config: &ServerConfig) -> HttpState {
    let accounts = AccountService::new(
        Arc::clone(&config.accounts),
        Arc::clone(&config.hasher),
        Arc::clone(&config.notifications),
        config.notification_policy(),
    );
    let login = AccountLoginService::new(Arc::clone(&config.accounts), Arc::clone(&config.hasher));
    HttpState::new(
        Arc::new(accounts),
        Arc::new(login),
        ResponsePolicy {
            expose_password_hash: config.expose_password_hash,
        },
    )
}
