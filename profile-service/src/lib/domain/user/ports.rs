use async_trait::async_trait;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for account operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new account and log it in.
    ///
    /// # Arguments
    /// * `command` - Validated name, email, and clear-text password
    ///
    /// # Returns
    /// Signed token bound to the new user's id
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<String, UserError>;

    /// Exchange credentials for a token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<String, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// Storage enforces email uniqueness; this is the authoritative duplicate
    /// check even when callers look the email up first.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;

    /// Remove user from storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &UserId) -> Result<(), UserError>;
}
