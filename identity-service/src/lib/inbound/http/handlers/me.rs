use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

/// Return the identity resolved from the bearer token.
///
/// Answered from the token claims alone, without a storage lookup.
pub async fn me(user: AuthenticatedUser) -> ApiSuccess<MeResponseData> {
    ApiSuccess::new(StatusCode::OK, MeResponseData::from(user))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeResponseData {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<AuthenticatedUser> for MeResponseData {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            id: user.user_id.to_string(),
            name: user.name,
            email: user.email,
        }
    }
}
