//! Argon2id password hashing and verification.

use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use tokio::task;

use crate::config::SecurityConfig;

/// Cost parameters for new hashes. Verification reads them from the stored hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParams {
    pub memory_cost_kib: u32,
    pub time_cost: u32,
    pub parallelism: u32,
}

impl Default for HashParams {
    fn default() -> Self {
        Self::from(&SecurityConfig::default())
    }
}

impl From<&SecurityConfig> for HashParams {
    fn from(cfg: &SecurityConfig) -> Self {
        Self {
            memory_cost_kib: cfg.argon2_memory_cost_kib,
            time_cost: cfg.argon2_time_cost,
            parallelism: cfg.argon2_parallelism,
        }
    }
}

/// Hash a password with a random salt into a PHC string.
pub fn hash_password(password: &str, params: HashParams) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let params = Params::new(
        params.memory_cost_kib,
        params.time_cost,
        params.parallelism,
        None,
    )
    .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

/// Check a password against a stored hash. The digest comparison is constant-time.
///
/// Anything that is not a PHC string (the temp-user sentinel included) never verifies.
#[must_use]
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(stored_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Whether `hash` parses as a PHC string. The temp-user sentinel does not.
#[must_use]
pub fn is_phc_hash(hash: &str) -> bool {
    PasswordHash::new(hash).is_ok()
}

/// [`hash_password`] on the blocking pool; Argon2 is CPU and memory heavy.
pub async fn hash_password_blocking(password: &str, params: HashParams) -> Result<String> {
    let password = password.to_string();
    task::spawn_blocking(move || hash_password(&password, params))
        .await
        .context("Password hashing task panicked")?
}

/// [`verify_password`] on the blocking pool.
pub async fn verify_password_blocking(password: &str, stored_hash: &str) -> Result<bool> {
    let password = password.to_string();
    let stored_hash = stored_hash.to_string();
    task::spawn_blocking(move || verify_password(&password, &stored_hash))
        .await
        .context("Password verification task panicked")
}
