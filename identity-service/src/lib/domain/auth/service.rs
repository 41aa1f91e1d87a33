use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::TokenSubject;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::TokenResponse;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::models::User;
use crate::user::ports::UserRepository;

/// Domain service implementation for registration and login.
///
/// Argon2 work is moved off the async workers with `spawn_blocking`.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hasher and token signer
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    fn issue_token(&self, user: &User) -> Result<TokenResponse, AuthError> {
        let subject = TokenSubject::new(user.id, user.name.as_str(), user.email.as_str());
        let issued = self.authenticator.issue_token(&subject)?;

        Ok(TokenResponse::bearer(
            issued.access_token,
            self.authenticator.token_expiry_seconds(),
        ))
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<TokenResponse, AuthError> {
        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            return Err(AuthError::EmailAlreadyExists);
        }

        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(password.expose()))
                .await
                .map_err(|e| AuthError::Internal(format!("Hashing task failed: {}", e)))??;

        // The unique constraint still decides if another request won the race.
        let user = self
            .repository
            .create(User::new(command.name, command.email, password_hash))
            .await?;

        let response = self.issue_token(&user)?;
        tracing::info!(user_id = %user.id, "User registered");

        Ok(response)
    }

    async fn login(&self, command: LoginCommand) -> Result<TokenResponse, AuthError> {
        let user = self.repository.find_by_email(&command.email).await?;

        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        // Accounts without a credential take the unknown-account path.
        let stored_hash = user
            .as_ref()
            .and_then(|user| user.password_hash())
            .map(str::to_string);
        let verified = tokio::task::spawn_blocking(move || {
            authenticator.verify_password(password.expose(), stored_hash.as_deref())
        })
        .await
        .map_err(|e| AuthError::Internal(format!("Verification task failed: {}", e)))?;

        let user = match user {
            Some(user) if verified => user,
            _ => {
                tracing::debug!("Login rejected");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let response = self.issue_token(&user)?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(response)
    }
}
