use chrono::Duration;
use thiserror::Error;

use crate::jwt::Claims;
use crate::jwt::IssuedToken;
use crate::jwt::JwtError;
use crate::jwt::TokenError;
use crate::jwt::TokenService;
use crate::jwt::TokenSubject;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Error raised while building an `Authenticator`.
#[derive(Debug, Clone, Error)]
pub enum AuthenticatorError {
    #[error(transparent)]
    Token(#[from] JwtError),

    #[error(transparent)]
    Password(#[from] PasswordError),
}

/// Authentication coordinator combining password hashing and token handling.
///
/// Holds only immutable key material, so one instance is shared (behind an
/// `Arc`) by every request.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_service: TokenService,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    /// * `token_lifetime` - Validity period of issued tokens
    ///
    /// # Errors
    /// * `Token` - The secret is empty or the lifetime is not positive
    /// * `Password` - The reference hash for unknown accounts could not be computed
    pub fn new(
        jwt_secret: &[u8],
        token_lifetime: Duration,
    ) -> Result<Self, AuthenticatorError> {
        Ok(Self {
            password_hasher: PasswordHasher::new()?,
            token_service: TokenService::new(jwt_secret, token_lifetime)?,
        })
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against the stored hash of an account.
    ///
    /// `None` means there is no such account. The password is still run
    /// through a full verification so that both failure paths cost the same.
    pub fn verify_password(&self, password: &str, stored_hash: Option<&str>) -> bool {
        match stored_hash {
            Some(hash) => self.password_hasher.verify(password, hash),
            None => self.password_hasher.verify_dummy(password),
        }
    }

    /// Issue an access token for a subject.
    pub fn issue_token(&self, subject: &TokenSubject) -> Result<IssuedToken, JwtError> {
        self.token_service.issue(subject)
    }

    /// Validate an access token and return its claims.
    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.token_service.validate(token)
    }

    /// Lifetime of issued tokens in seconds.
    pub fn token_expiry_seconds(&self) -> i64 {
        self.token_service.expiry_seconds()
    }
}
