//! Signing secret strength checks.
//!
//! HS256 keys shorter than the hash output (32 bytes) weaken the MAC, and a
//! placeholder secret copied from a sample configuration lets anyone mint
//! tokens. [`SecretPolicy`] rejects both.

use thiserror::Error;

/// Placeholder secrets that ship in sample configuration files.
pub const PLACEHOLDER_SECRETS: &[&str] = &[
    "your-super-secret-key-change-in-production",
    "change-me",
    "changeme",
    "secret",
];

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SecretError {
    #[error("Signing secret is empty")]
    Empty,

    #[error("Signing secret is a known placeholder value")]
    Placeholder,

    #[error("Signing secret is {actual} bytes, minimum is {minimum}")]
    TooShort { actual: usize, minimum: usize },
}

/// Minimum requirements for an HMAC signing secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecretPolicy {
    pub min_length: usize,
}

impl SecretPolicy {
    pub const DEFAULT_MIN_LENGTH: usize = 32;

    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    /// Check a secret against the policy.
    ///
    /// The error never contains the secret itself.
    pub fn check(&self, secret: &str) -> Result<(), SecretError> {
        if secret.is_empty() {
            return Err(SecretError::Empty);
        }
        if PLACEHOLDER_SECRETS
            .iter()
            .any(|placeholder| secret.eq_ignore_ascii_case(placeholder))
        {
            return Err(SecretError::Placeholder);
        }
        if secret.len() < self.min_length {
            return Err(SecretError::TooShort {
                actual: secret.len(),
                minimum: self.min_length,
            });
        }
        Ok(())
    }
}

impl Default for SecretPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_LENGTH)
    }
}
