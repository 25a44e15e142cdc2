//! Driven port for one-way password hashing.

use crate::domain::{Password, PasswordHash};

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHasherError {
        /// The hash could not be computed.
        Hashing { message: String } => "password hashing failed: {message}",
        /// A stored hash could not be parsed for verification.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// One-way hash plus verification of stored credentials.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into an opaque encoded form.
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHasherError>;

    /// Check a plaintext password against a stored hash.
    fn verify(&self, password: &Password, hash: &PasswordHash) -> Result<bool, PasswordHasherError>;
}

/// Deterministic, insecure hasher for tests and local fixtures.
///
/// The encoded form is `fixture$` followed by the reversed password, so
/// hashes are stable across runs and never equal to the plaintext.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePasswordHasher;

impl FixturePasswordHasher {
    fn encode(password: &Password) -> String {
        format!("fixture${}", password.expose().chars().rev().collect::<String>())
    }
}

impl PasswordHasher for FixturePasswordHasher {
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHasherError> {
        Ok(PasswordHash::new(Self::encode(password)))
    }

    fn verify(&self, password: &Password, hash: &PasswordHash) -> Result<bool, PasswordHasherError> {
        Ok(Self::encode(password) == hash.as_str())
    }
}
