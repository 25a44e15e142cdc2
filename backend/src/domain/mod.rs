//! Account domain: value types, access rules, and the lifecycle engine.
//!
//! Purpose: Keep every account invariant in one transport-agnostic layer.
//! Inbound and outbound adapters talk to this module only through the traits
//! in [`ports`].
//!
//! Public surface:
//! - Account value types (`Account`, `Username`, `EmailAddress`, `Role`, ...).
//! - `AccessControl`: pure permit/deny decisions.
//! - `AccountService`: the lifecycle engine behind `ports::AccountLifecycle`.
//! - `AdminNotifier`: lifecycle notification fan-out.
//! - `AccountLoginService`: credential checks behind `ports::LoginService`.
//! - `ensure_admin`: silent startup provisioning of the first admin.
//! - `Error`/`ErrorCode`: transport-agnostic failures.

pub mod access;
pub mod account;
pub mod admin_bootstrap;
pub mod account_service;
pub mod auth;
pub mod caller;
pub mod error;
pub mod login;
pub mod notification;
pub mod ports;
pub mod trace_id;

pub use self::access::AccessControl;
pub use self::account::{
    Account, AccountId, AccountValidationError, EMAIL_MAX, EmailAddress, NewAccount,
    PasswordHash, Role, USERNAME_MAX, Username,
};
pub use self::account_service::AccountService;
pub use self::admin_bootstrap::{AdminBootstrapError, AdminSeed, BootstrapOutcome, ensure_admin};
pub use self::auth::{LoginCredentials, LoginValidationError, Password};
pub use self::caller::CallerContext;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::login::AccountLoginService;
pub use self::notification::{
    AdminNotifier, FanOutReport, LifecycleAction, NotificationMessage, NotificationPolicy,
    REDACTED_HASH,
};
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use account_service::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("access denied"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
