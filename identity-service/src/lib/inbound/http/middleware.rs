use async_trait::async_trait;
use auth::TokenError;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use thiserror::Error;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Identity resolved from a verified bearer token.
///
/// Inserted into request extensions by [`authenticate`]; handlers behind the
/// gate take it as an extractor argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
}

/// Reasons a request is turned away by the gate. All map to 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("Missing authorization header")]
    MissingHeader,

    #[error("Invalid authorization header format")]
    MalformedHeader,

    #[error("Token has expired")]
    Expired,

    #[error("Invalid or expired token")]
    InvalidToken,
}

impl From<TokenError> for GateError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => GateError::Expired,
            TokenError::Invalid => GateError::InvalidToken,
        }
    }
}

impl From<GateError> for ApiError {
    fn from(err: GateError) -> Self {
        ApiError::Unauthorized(err.to_string())
    }
}

/// Middleware that validates bearer tokens and adds the identity to request extensions.
///
/// Never touches storage: a token stays usable until it expires, even if the
/// user behind it has been deleted.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = {
        let token = extract_token(req.headers()).map_err(|e| {
            tracing::debug!(reason = %e, "Rejected authorization header");
            e
        })?;

        state.authenticator.validate_token(token).map_err(|e| {
            tracing::debug!(reason = %e, "Token validation failed");
            GateError::from(e)
        })?
    };

    let user_id = UserId::from_string(&claims.sub).map_err(|e| {
        tracing::warn!("Token subject is not a user ID: {}", e);
        GateError::InvalidToken
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id,
        name: claims.name,
        email: claims.email,
    });

    Ok(next.run(req).await)
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
///
/// The scheme is matched exactly and case-sensitively. Anything else is
/// rejected here, before any attempt to decode a token.
///
/// # Errors
/// * `MissingHeader` - No header, or an empty one
/// * `MalformedHeader` - Not visible ASCII, or not `Bearer` followed by a token
pub fn extract_token(headers: &HeaderMap) -> Result<&str, GateError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(GateError::MissingHeader)?
        .to_str()
        .map_err(|_| GateError::MalformedHeader)?;

    if value.is_empty() {
        return Err(GateError::MissingHeader);
    }

    let mut parts = value.splitn(2, ' ');
    match (parts.next(), parts.next()) {
        (Some("Bearer"), Some(token)) => Ok(token),
        _ => Err(GateError::MalformedHeader),
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| GateError::MissingHeader.into())
    }
}
