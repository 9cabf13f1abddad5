use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;
use tokio::sync::OnceCell;

use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Session;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for account operations.
///
/// Password hashing and verification are CPU bound and run on tokio's
/// blocking pool. A login for an unknown username still verifies against a
/// placeholder digest, so it costs as much as a wrong password.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    placeholder_digest: OnceCell<String>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store implementation
    /// * `authenticator` - Password hasher and token issuer
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
            placeholder_digest: OnceCell::new(),
        }
    }

    async fn hash_password(&self, password: Password) -> Result<String, UserError> {
        let hasher = self.authenticator.password_hasher().clone();

        tokio::task::spawn_blocking(move || hasher.hash(password.expose()))
            .await
            .map_err(|e| UserError::Unknown(e.to_string()))?
            .map_err(|e| UserError::Password(e.to_string()))
    }

    /// Digest of a fixed password, hashed once with the configured cost.
    async fn placeholder_digest(&self) -> Result<String, UserError> {
        self.placeholder_digest
            .get_or_try_init(|| async {
                self.hash_password(Password::new(PLACEHOLDER_PASSWORD.to_string())?)
                    .await
            })
            .await
            .cloned()
    }

    /// Spend one verification on an unknown username, then refuse it.
    async fn reject_unknown_user(&self, password: &str) -> Result<Session, UserError> {
        let digest = self.placeholder_digest().await?;
        let hasher = self.authenticator.password_hasher().clone();
        let password = password.to_string();

        tokio::task::spawn_blocking(move || hasher.verify(&digest, &password))
            .await
            .map_err(|e| UserError::Unknown(e.to_string()))?;

        Err(UserError::InvalidCredentials)
    }
}

const PLACEHOLDER_PASSWORD: &str = "placeholder-password-for-unknown-users";

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<Session, UserError> {
        let password_hash = self.hash_password(command.password).await?;

        let user = User {
            username: command.username,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create_user(user).await?;

        let token = self
            .authenticator
            .issue_token(created_user.username.as_str())
            .map_err(|e| UserError::Token(e.to_string()))?;

        tracing::info!(username = %created_user.username, "User registered");

        Ok(Session {
            user: created_user,
            token,
        })
    }

    async fn authenticate(
        &self,
        username: &Username,
        password: &str,
    ) -> Result<Session, UserError> {
        let user = match self.repository.get_user(username).await {
            Ok(user) => user,
            Err(UserError::NotFound(_)) => {
                tracing::debug!(username = %username, "Login for unknown user");
                return self.reject_unknown_user(password).await;
            }
            Err(e) => return Err(e),
        };

        let authenticator = Arc::clone(&self.authenticator);
        let name = user.username.as_str().to_string();
        let password = password.to_string();
        let stored_hash = user.password_hash.clone();

        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&name, &password, &stored_hash)
        })
        .await
        .map_err(|e| UserError::Unknown(e.to_string()))?;

        match result {
            Ok(token) => {
                tracing::info!(username = %user.username, "User logged in");
                Ok(Session { user, token })
            }
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::debug!(username = %username, "Login with wrong password");
                Err(UserError::InvalidCredentials)
            }
            Err(AuthenticationError::JwtError(e)) => Err(UserError::Token(e.to_string())),
        }
    }
}
