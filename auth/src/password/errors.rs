use thiserror::Error;

/// Error type for password operations.
///
/// Verification has no error variant: it fails closed and reports a mismatch.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
