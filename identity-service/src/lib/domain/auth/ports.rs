use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::TokenResponse;

/// Port for credential operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Create a new identity and issue its first access token.
    ///
    /// # Arguments
    /// * `command` - Validated name, email, and password
    ///
    /// # Returns
    /// Bearer token for the new identity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Internal` - Storage, hashing, or signing failed
    async fn register(&self, command: RegisterCommand) -> Result<TokenResponse, AuthError>;

    /// Exchange email and password for an access token.
    ///
    /// # Arguments
    /// * `command` - Email and password presented by the client
    ///
    /// # Returns
    /// Bearer token for the identity
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `Internal` - Storage, hashing, or signing failed
    async fn login(&self, command: LoginCommand) -> Result<TokenResponse, AuthError>;
}
