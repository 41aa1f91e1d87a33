//! Credential and token library
//!
//! Provides the reusable building blocks of the identity service:
//! - Password hashing (Argon2id), failing closed on verification
//! - Stateless HS256 access tokens with expiry and not-before checks
//! - Signing secret strength policy
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new().unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("not_my_password", &hash));
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{TokenError, TokenService, TokenSubject};
//! use chrono::Duration;
//!
//! let service = TokenService::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(24)).unwrap();
//! let subject = TokenSubject::new("user123", "Alice", "alice@example.com");
//!
//! let issued = service.issue(&subject).unwrap();
//! let claims = service.validate(&issued.access_token).unwrap();
//! assert_eq!(claims.sub, "user123");
//!
//! assert_eq!(service.validate("garbage"), Err(TokenError::Invalid));
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod secret;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use authenticator::AuthenticatorError;
pub use jwt::Claims;
pub use jwt::IssuedToken;
pub use jwt::JwtError;
pub use jwt::TokenError;
pub use jwt::TokenService;
pub use jwt::TokenSubject;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use secret::SecretError;
pub use secret::SecretPolicy;
