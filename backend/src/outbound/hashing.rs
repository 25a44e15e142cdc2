//! Argon2id password hashing adapter.
//!
//! Hashes are PHC strings carrying their own parameters and salt, so stored
//! hashes stay verifiable after the default cost settings change.

use argon2::password_hash::{
    Error as PasswordHashError, PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier,
    Salt, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use rand::rngs::OsRng;

use crate::domain::ports::{PasswordHasher, PasswordHasherError};
use crate::domain::{Password, PasswordHash};

/// [`PasswordHasher`] backed by Argon2id with random per-hash salts.
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Hasher with explicit cost parameters (memory KiB, iterations, lanes).
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHasherError::Hashing`] when the parameters are out of
    /// range.
    pub fn with_costs(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordHasherError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|err| PasswordHasherError::hashing(format!("invalid argon2 params: {err}")))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    fn salt() -> Result<SaltString, PasswordHasherError> {
        let mut bytes = [0_u8; Salt::RECOMMENDED_LENGTH];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|err| PasswordHasherError::hashing(format!("salt generation failed: {err}")))?;
        SaltString::encode_b64(&bytes).map_err(|err| PasswordHasherError::hashing(err.to_string()))
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHasherError> {
        let salt = Self::salt()?;
        let encoded = self
            .argon2
            .hash_password(password.expose().as_bytes(), &salt)
            .map_err(|err| PasswordHasherError::hashing(err.to_string()))?;
        Ok(PasswordHash::new(encoded.to_string()))
    }

    fn verify(&self, password: &Password, hash: &PasswordHash) -> Result<bool, PasswordHasherError> {
        let parsed = PhcHash::new(hash.as_str())
            .map_err(|err| PasswordHasherError::malformed_hash(err.to_string()))?;
        match self
            .argon2
            .verify_password(password.expose().as_bytes(), &parsed)
        {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(err) => Err(PasswordHasherError::hashing(err.to_string())),
        }
    }
}
