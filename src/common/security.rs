//! Argon2id password hashing.
//!
//! Hashing and verification are CPU-bound, so the async entry points run them
//! on tokio's blocking pool.

use std::sync::LazyLock;

use anyhow::{anyhow, Context, Result};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use tokio::task;

/// Hash checked when the username is unknown, so both login failures cost
/// one verification.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_blocking("filmoteka-unknown-user").ok());

/// Argon2id hash with a fresh random salt, in PHC string form.
pub async fn hash_password(password: &str) -> Result<String> {
    let password = password.to_string();
    task::spawn_blocking(move || hash_blocking(&password))
        .await
        .context("password hashing task panicked")?
}

/// `Ok(false)` on mismatch; `Err` only when the stored hash is unreadable.
pub async fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    let password = password.to_string();
    let stored_hash = stored_hash.to_string();
    task::spawn_blocking(move || verify_blocking(&password, &stored_hash))
        .await
        .context("password verification task panicked")?
}

/// Runs a verification that always fails, for logins naming no user.
pub async fn verify_unknown_user(password: &str) {
    let password = password.to_string();
    let outcome = task::spawn_blocking(move || match DUMMY_HASH.as_deref() {
        Some(hash) => verify_blocking(&password, hash).map(|_| ()),
        None => Err(anyhow!("dummy hash unavailable")),
    })
    .await;

    match outcome {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::warn!(error = %e, "unknown-user verification skipped"),
        Err(e) => tracing::warn!(error = %e, "unknown-user verification task failed"),
    }
}

fn hash_blocking(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("hash password: {e}"))?;
    Ok(hash.to_string())
}

fn verify_blocking(password: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| anyhow!("parse stored hash: {e}"))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(anyhow!("verify password: {e}")),
    }
}
