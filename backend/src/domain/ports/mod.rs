//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_lifecycle;
mod account_repository;
mod login_service;
mod notification_sink;
mod password_hasher;

#[cfg(test)]
pub use account_lifecycle::MockAccountLifecycle;
pub use account_lifecycle::{AccountLifecycle, AccountPatch, RegistrationRequest};
#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountRepository, AccountRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use notification_sink::MockNotificationSink;
pub use notification_sink::{NotificationDeliveryError, NotificationSink};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{FixturePasswordHasher, PasswordHasher, PasswordHasherError};
