//! Credential hashing for the account store.
//!
//! Every write path that receives a plaintext password goes through
//! [`CredentialHasher::seal`] before the statement is built; nothing else
//! in the crate produces a `password_hash` value. Hashing and
//! verification run on the blocking pool so an expensive hash does not
//! stall other account operations.

use std::sync::Arc;

use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};

use crate::error::DbError;

/// Argon2id work factor and optional pepper.
#[derive(Debug, Clone)]
pub struct HashingConfig {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
    /// Server-side secret prepended to passwords before hashing and
    /// verification.
    pub pepper: Option<String>,
}

impl Default for HashingConfig {
    fn default() -> Self {
        // OWASP ASVS recommended: m=19456 (19 MiB), t=2, p=1
        Self {
            memory_kib: 19456,
            iterations: 2,
            parallelism: 1,
            pepper: None,
        }
    }
}

/// Hashes and verifies account passwords with a fixed Argon2id work factor.
#[derive(Clone)]
pub struct CredentialHasher {
    params: Params,
    pepper: Option<Arc<str>>,
}

impl std::fmt::Debug for CredentialHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialHasher")
            .field("params", &self.params)
            .field("pepper", &self.pepper.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl CredentialHasher {
    pub fn new(config: &HashingConfig) -> Result<Self, DbError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| DbError::Credential(format!("argon2 params error: {e}")))?;

        Ok(Self {
            params,
            pepper: config.pepper.as_deref().map(Arc::from),
        })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    fn peppered(&self, password: &str) -> Vec<u8> {
        match &self.pepper {
            Some(p) => format!("{p}{password}").into_bytes(),
            None => password.as_bytes().to_vec(),
        }
    }

    /// Hash a plaintext password into a PHC string with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String, DbError> {
        let input = self.peppered(password);
        let salt = SaltString::generate(&mut argon2::password_hash::rand_core::OsRng);
        let hash = self
            .argon2()
            .hash_password(&input, &salt)
            .map_err(|e| DbError::Credential(format!("password hash error: {e}")))?;

        Ok(hash.to_string())
    }

    /// Check a plaintext password against a stored PHC string.
    ///
    /// Returns `Ok(false)` on mismatch and an error only when the stored
    /// hash cannot be parsed.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, DbError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| DbError::Credential(format!("invalid hash format: {e}")))?;

        // Parameters come from the PHC string, not from `self.params`.
        match Argon2::default().verify_password(&self.peppered(password), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(DbError::Credential(format!("verify error: {e}"))),
        }
    }

    /// Hash on the blocking pool. This is the only producer of stored
    /// `password_hash` values.
    pub async fn seal(&self, password: String) -> Result<String, DbError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DbError::Credential(format!("hashing task failed: {e}")))?
    }

    /// [`verify`](Self::verify) on the blocking pool.
    pub async fn check(&self, password: String, hash: String) -> Result<bool, DbError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| DbError::Credential(format!("verification task failed: {e}")))?
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
            pepper: None,
        }
    }
}
