//! Password hashing and strength rules
//!
//! Hashes are Argon2id PHC strings with a random salt per hash.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use roster_core::DomainError;

use crate::error::AppError;

const MIN_PASSWORD_LEN: usize = 8;

/// Strength rules, checked in order; the first failure is reported
const STRENGTH_RULES: &[(fn(&str) -> bool, &str)] = &[
    (
        |p| p.chars().count() >= MIN_PASSWORD_LEN,
        "must be at least 8 characters long",
    ),
    (
        |p| p.chars().any(char::is_uppercase),
        "must contain an uppercase letter",
    ),
    (
        |p| p.chars().any(char::is_lowercase),
        "must contain a lowercase letter",
    ),
    (|p| p.chars().any(|c| c.is_ascii_digit()), "must contain a digit"),
];

/// Check a new password against the strength rules
///
/// # Errors
/// Returns `DomainError::WeakPassword` naming the first rule that fails
pub fn validate_password_strength(password: &str) -> Result<(), DomainError> {
    match STRENGTH_RULES.iter().find(|(rule, _)| !rule(password)) {
        Some((_, reason)) => Err(DomainError::WeakPassword(format!("password {reason}"))),
        None => Ok(()),
    }
}

/// Argon2id hasher
#[derive(Debug, Clone, Default)]
pub struct PasswordService {
    argon2: Argon2<'static>,
}

impl PasswordService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash a password with a fresh salt
    ///
    /// # Errors
    /// Returns an error if hashing fails
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::internal(anyhow::anyhow!("Password hashing failed: {e}")))
    }

    /// Verify a password against a stored hash
    ///
    /// # Errors
    /// Returns an error if the stored hash is malformed
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(anyhow::anyhow!("Invalid password hash format: {e}")))?;
        Ok(self.argon2.verify_password(password.as_bytes(), &parsed).is_ok())
    }

    /// Verify a password, mapping a mismatch to `InvalidCredentials`
    ///
    /// # Errors
    /// Returns `AppError::InvalidCredentials` if the password doesn't match
    pub fn verify_or_error(&self, password: &str, hash: &str) -> Result<(), AppError> {
        if self.verify(password, hash)? {
            Ok(())
        } else {
            Err(AppError::InvalidCredentials)
        }
    }
}
