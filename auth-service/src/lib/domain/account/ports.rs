use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::models::RegisterCommand;
use crate::account::models::User;
use crate::account::models::UserId;
use crate::account::models::Username;

/// Port for the authentication service operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user with validated credentials.
    ///
    /// Hashes the password and persists the record. No token is issued at
    /// registration; login is a separate step.
    ///
    /// # Errors
    /// * `UsernameTaken` - Username is already registered
    /// * `Repository` - Persistence operation failed
    async fn register(&self, command: RegisterCommand) -> Result<User, AccountError>;

    /// Authenticate credentials and issue a signed access token.
    ///
    /// An unknown username and a wrong password collapse into the same
    /// `InvalidCredentials` error so callers cannot enumerate usernames.
    ///
    /// # Returns
    /// Signed access token carrying the user's id and role
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `Repository` - Persistence operation failed
    async fn login(&self, username: &str, password: &str) -> Result<String, AccountError>;

    /// Retrieve all users.
    ///
    /// # Errors
    /// * `Repository` - Persistence operation failed
    async fn list_users(&self) -> Result<Vec<User>, AccountError>;

    /// Retrieve a user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Repository` - Persistence operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, AccountError>;
}

/// Persistence operations for the user aggregate.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new user to storage.
    ///
    /// Username uniqueness is enforced atomically at the storage layer:
    /// of two concurrent creates for the same username, exactly one
    /// succeeds and the other fails with `UsernameTaken`.
    ///
    /// # Errors
    /// * `UsernameTaken` - Username is already registered
    /// * `Repository` - Persistence operation failed
    async fn create(&self, user: User) -> Result<User, AccountError>;

    /// Retrieve a user by username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AccountError>;

    /// Retrieve a user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AccountError>;

    /// Retrieve all users from storage, in insertion order.
    async fn list_all(&self) -> Result<Vec<User>, AccountError>;
}
