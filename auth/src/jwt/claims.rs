use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Identity data a token is issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl TokenSubject {
    pub fn new(id: impl ToString, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Claims carried by an access token.
///
/// Registered claims (`sub`, `iat`, `nbf`, `exp`) follow RFC 7519 and are Unix
/// timestamps in seconds. The token is signed, not encrypted: nothing placed
/// here is secret.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (identity identifier)
    pub sub: String,

    /// Display name at issuance time
    pub name: String,

    /// Email at issuance time
    pub email: String,

    /// Issued at
    pub iat: i64,

    /// Not before
    pub nbf: i64,

    /// Expiration time
    pub exp: i64,
}

impl Claims {
    /// Build claims for a subject, valid from `issued_at` for `lifetime`.
    pub fn for_subject(subject: &TokenSubject, issued_at: DateTime<Utc>, lifetime: Duration) -> Self {
        let iat = issued_at.timestamp();

        Self {
            sub: subject.id.clone(),
            name: subject.name.clone(),
            email: subject.email.clone(),
            iat,
            nbf: iat,
            exp: (issued_at + lifetime).timestamp(),
        }
    }

    /// A token is expired once `exp` is no longer strictly in the future.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }

    /// A token becomes usable at `nbf`.
    pub fn is_active(&self, current_timestamp: i64) -> bool {
        self.nbf <= current_timestamp
    }
}
