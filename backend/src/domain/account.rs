//! Account data model.
//!
//! Value types validate their input once at the edge so the lifecycle engine
//! only ever handles well-formed usernames and email addresses.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 64;
/// Maximum allowed length for an email address.
pub const EMAIL_MAX: usize = 254;

/// Validation errors returned by the account value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountValidationError {
    /// Account id was blank.
    #[error("account id must not be empty")]
    EmptyId,
    /// Account id was not a UUID.
    #[error("account id must be a valid UUID")]
    InvalidId,
    /// Username was blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Username exceeded [`USERNAME_MAX`] characters.
    #[error("username must be at most {max} characters")]
    UsernameTooLong {
        /// Maximum permitted length.
        max: usize,
    },
    /// Username contained interior whitespace.
    #[error("username must not contain whitespace")]
    UsernameContainsWhitespace,
    /// Email was blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Email was not of the form `local@domain`.
    #[error("email must be a valid address")]
    InvalidEmail,
    /// Email exceeded [`EMAIL_MAX`] characters.
    #[error("email must be at most {max} characters")]
    EmailTooLong {
        /// Maximum permitted length.
        max: usize,
    },
}

/// Stable account identifier assigned by the store on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(Uuid);

impl AccountId {
    /// Validate and construct an [`AccountId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(AccountValidationError::EmptyId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| AccountValidationError::InvalidId)
    }

    /// Generate a new random [`AccountId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID, typically read back from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<AccountId> for String {
    fn from(value: AccountId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for AccountId {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unique login name. Immutable once the account exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`], trimming surrounding whitespace.
    ///
    /// # Examples
    /// ```
    /// use account_service::domain::Username;
    ///
    /// let name = Username::new("  alice ").expect("valid username");
    /// assert_eq!(name.as_ref(), "alice");
    /// ```
    pub fn new(username: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let trimmed = username.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AccountValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(AccountValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(AccountValidationError::UsernameContainsWhitespace);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Email address used both as a unique account attribute and as the
/// notification recipient for admins.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`], trimming surrounding
    /// whitespace. Only the `local@domain` shape is checked.
    pub fn new(email: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let trimmed = email.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AccountValidationError::EmptyEmail);
        }
        if trimmed.chars().count() > EMAIL_MAX {
            return Err(AccountValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(AccountValidationError::InvalidEmail);
        }
        match trimmed.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(Self(trimmed.to_owned()))
            }
            _ => Err(AccountValidationError::InvalidEmail),
        }
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Opaque password hash produced by a [`PasswordHasher`].
///
/// `Debug` output is redacted so hashes never reach logs through derived
/// formatting of the enclosing [`Account`].
///
/// [`PasswordHasher`]: crate::domain::ports::PasswordHasher
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash string.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Borrow the encoded hash.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash([redacted])")
    }
}

/// Authorization role. Every account carries exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Regular account; may only see and change itself.
    #[default]
    User,
    /// Administrator; may see and change every account and receives
    /// lifecycle notifications.
    Admin,
}

impl Role {
    /// Stable storage and wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        }
    }

    /// Parse the storage representation produced by [`Role::as_str`].
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "USER" => Some(Self::User),
            "ADMIN" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Whether this role grants administrative access.
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account fields ready to be persisted; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    /// Unique login name.
    pub username: Username,
    /// Hash of the initial password.
    pub password_hash: PasswordHash,
    /// Unique contact address.
    pub email: EmailAddress,
    /// Optional given name.
    pub first_name: Option<String>,
    /// Optional family name.
    pub last_name: Option<String>,
    /// Initial role.
    pub role: Role,
}

impl NewAccount {
    /// Attach a store-assigned identifier, producing a persisted [`Account`].
    pub fn with_id(self, id: AccountId) -> Account {
        let Self {
            username,
            password_hash,
            email,
            first_name,
            last_name,
            role,
        } = self;
        Account {
            id,
            username,
            password_hash,
            email,
            first_name,
            last_name,
            role,
        }
    }
}

/// Persisted account.
///
/// ## Invariants
/// - `id` and `username` never change after creation.
/// - `role` only changes outside the lifecycle engine (admin bootstrap).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: AccountId,
    username: Username,
    password_hash: PasswordHash,
    email: EmailAddress,
    first_name: Option<String>,
    last_name: Option<String>,
    role: Role,
}

impl Account {
    /// Store-assigned identifier.
    pub fn id(&self) -> AccountId {
        self.id
    }

    /// Unique login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Current password hash.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Unique contact address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Given name, if recorded.
    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    /// Family name, if recorded.
    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    /// Authorization role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Replace the mutable profile fields in one step.
    pub fn with_profile(
        mut self,
        email: EmailAddress,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Self {
        self.email = email;
        self.first_name = first_name;
        self.last_name = last_name;
        self
    }

    /// Replace the stored password hash.
    pub fn with_password_hash(mut self, password_hash: PasswordHash) -> Self {
        self.password_hash = password_hash;
        self
    }
}
