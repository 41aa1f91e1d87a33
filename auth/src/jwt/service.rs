use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::TokenSubject;
use super::errors::JwtError;
use super::errors::TokenError;

/// A freshly signed access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
    /// Unix timestamp the token stops being accepted at
    pub expires_at: i64,
}

/// Issues and validates stateless bearer tokens.
///
/// Tokens are signed with HS256 (HMAC with SHA-256). Validation only accepts
/// HS256, so a token whose header names another algorithm is rejected before
/// its signature is looked at. The service holds nothing but the key material
/// and the lifetime, so it can be shared freely between requests.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    lifetime: Duration,
}

impl TokenService {
    /// Create a token service.
    ///
    /// # Arguments
    /// * `secret` - Key for signing and verifying tokens
    /// * `lifetime` - How long an issued token stays valid
    ///
    /// # Errors
    /// * `MissingSecret` - The secret is empty
    /// * `InvalidLifetime` - The lifetime is zero or negative
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8], lifetime: Duration) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::MissingSecret);
        }
        if lifetime <= Duration::zero() {
            return Err(JwtError::InvalidLifetime);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            lifetime,
        })
    }

    /// Sign a token for `subject`, valid from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Serializing or signing the claims failed
    pub fn issue(&self, subject: &TokenSubject) -> Result<IssuedToken, JwtError> {
        self.issue_at(subject, Utc::now())
    }

    /// Sign a token for `subject` as if issued at `issued_at`.
    pub fn issue_at(
        &self,
        subject: &TokenSubject,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, JwtError> {
        let claims = Claims::for_subject(subject, issued_at, self.lifetime);
        let header = Header::new(self.algorithm);

        let access_token = encode(&header, &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))?;

        Ok(IssuedToken {
            access_token,
            expires_at: claims.exp,
        })
    }

    /// Verify a token and return its claims.
    ///
    /// The signature is checked before any time-based claim, so `Expired` is
    /// only ever reported for a token this service actually signed.
    ///
    /// # Errors
    /// * `Expired` - Authentic token whose `exp` is not in the future
    /// * `Invalid` - Anything else: malformed, bad signature, other algorithm,
    ///   missing claims, or `nbf` in the future
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation()).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Invalid,
                }
            })?;

        let claims = token_data.claims;
        let now = Utc::now().timestamp();

        if claims.is_expired(now) {
            return Err(TokenError::Expired);
        }
        if !claims.is_active(now) {
            return Err(TokenError::Invalid);
        }

        Ok(claims)
    }

    /// Configured token lifetime in seconds.
    pub fn expiry_seconds(&self) -> i64 {
        self.lifetime.num_seconds()
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.set_required_spec_claims(&["sub", "iat", "nbf", "exp"]);
        validation
    }
}
