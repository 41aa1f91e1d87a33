use thiserror::Error;

/// Error type for token issuance.
///
/// Every variant is an internal failure, never a client-facing one.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Signing secret is not configured")]
    MissingSecret,

    #[error("Token lifetime must be positive")]
    InvalidLifetime,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}

/// Outcome of a failed token validation.
///
/// Malformed input, bad signature, wrong algorithm, and not-yet-valid tokens
/// all collapse into `Invalid`.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token is expired")]
    Expired,

    #[error("Token is invalid")]
    Invalid,
}
