use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for account operations.
///
/// Registration and login both end in a signed token; the signing secret comes
/// from the injected authenticator.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token signing
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    fn issue_token(&self, id: &UserId) -> Result<String, UserError> {
        self.authenticator
            .generate_token(&id.to_string())
            .map_err(|e| UserError::Unknown(format!("Token generation failed: {}", e)))
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<String, UserError> {
        // Advisory only: the repository's unique constraint settles races.
        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let avatar_url = self.authenticator.avatar_url(command.email.as_str());

        // Argon2 is CPU-bound; keep it off the async workers.
        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
                .await
                .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))?
                .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))?;

        let user = User {
            id: UserId::new(),
            name: command.name,
            email: command.email,
            password_hash,
            avatar_url,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        self.issue_token(&created_user.id)
    }

    async fn login(&self, command: LoginCommand) -> Result<String, UserError> {
        let user = self
            .repository
            .find_by_email(&command.email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let stored_hash = user.password_hash.clone();
        let subject = user.id.to_string();
        let outcome = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &stored_hash, &subject)
        })
        .await
        .map_err(|e| UserError::Unknown(format!("Password verification task failed: {}", e)))?;

        outcome
            .map(|result| result.access_token)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::debug!(user_id = %user.id, "Password mismatch");
                    UserError::InvalidCredentials
                }
                AuthenticationError::TokenError(err) => {
                    UserError::Unknown(format!("Token generation failed: {}", err))
                }
            })
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}
