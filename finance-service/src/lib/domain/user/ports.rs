use async_trait::async_trait;

use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Session;
use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::models::Username;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Create a new account and open a session for it.
    ///
    /// # Arguments
    /// * `command` - Validated username and password
    ///
    /// # Returns
    /// Created user with a freshly issued session token
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `Password` - Password hashing failed
    /// * `Token` - Token signing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<Session, UserError>;

    /// Verify credentials and open a session.
    ///
    /// # Arguments
    /// * `username` - Account to log into
    /// * `password` - Plaintext password to verify
    ///
    /// # Returns
    /// The account with a freshly issued session token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password, indistinguishably
    /// * `Token` - Token signing failed
    /// * `DatabaseError` - Database operation failed
    async fn authenticate(&self, username: &Username, password: &str)
        -> Result<Session, UserError>;
}

/// Credential store for user records.
///
/// Implementations must keep usernames unique even under concurrent
/// `create_user` calls, and must never overwrite an existing record.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Arguments
    /// * `user` - User entity carrying the already hashed password
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create_user(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by username.
    ///
    /// # Errors
    /// * `NotFound` - No user with this username
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, username: &Username) -> Result<User, UserError>;
}
