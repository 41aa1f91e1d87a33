use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Argon2id with the library's default cost parameters (19 MiB, 2 passes, 1 lane)
/// and a fresh random salt per hash.
///
/// Construction pays for one hash up front: the result is the reference hash
/// that `verify_dummy` checks against, so the first unknown-account login
/// costs the same as every later one.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    dummy_hash: String,
}

const DUMMY_PASSWORD: &str = "timing-equalization-placeholder";

impl PasswordHasher {
    /// Create a new password hasher instance.
    ///
    /// # Errors
    /// * `HashingFailed` - The reference hash could not be computed
    pub fn new() -> Result<Self, PasswordError> {
        let dummy_hash = hash_with_random_salt(DUMMY_PASSWORD)?;
        Ok(Self { dummy_hash })
    }

    /// Hash a plaintext password securely.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        hash_with_random_salt(password)
    }

    /// Verify a password against a stored hash.
    ///
    /// Fails closed: a hash that cannot be parsed, or any verification error,
    /// is reported as a mismatch. The digest comparison inside `argon2` is
    /// constant time.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True only if the password matches the hash
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Run a full verification against a fixed hash and discard the result.
    ///
    /// Used when there is no stored hash to check (unknown account) so the
    /// caller pays the same hashing cost as a real mismatch.
    pub fn verify_dummy(&self, password: &str) -> bool {
        self.verify(password, &self.dummy_hash);
        false
    }
}

fn hash_with_random_salt(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))
}
