//! Authentication primitives such as passwords and login credentials.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use crate::domain::{AccountValidationError, Username};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username was missing, blank, or otherwise malformed.
    #[error("invalid username: {0}")]
    Username(#[from] AccountValidationError),
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Plaintext password held only long enough to hash or verify it.
///
/// The buffer is wiped on drop and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Wrap a plaintext password. Whitespace is preserved verbatim.
    pub fn new(plaintext: impl Into<String>) -> Self {
        Self(Zeroizing::new(plaintext.into()))
    }

    /// Reject blank passwords.
    pub fn try_new(plaintext: impl Into<String>) -> Result<Self, LoginValidationError> {
        let password = Self::new(plaintext);
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(password)
    }

    /// Borrow the plaintext for hashing adapters.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Whether the password has zero length.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([redacted])")
    }
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` obeys the [`Username`] rules (trimmed, no inner whitespace).
/// - `password` is non-empty but retains caller-provided whitespace to avoid
///   surprising credential comparisons.
///
/// # Examples
/// ```
/// use account_service::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" carol ", "s3cret").unwrap();
/// assert_eq!(creds.username().as_ref(), "carol");
/// assert_eq!(creds.password().expose(), "s3cret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: Username,
    password: Password,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = Username::new(username)?;
        let password = Password::try_new(password)?;
        Ok(Self { username, password })
    }

    /// Username suitable for account lookups.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &Password {
        &self.password
    }
}
