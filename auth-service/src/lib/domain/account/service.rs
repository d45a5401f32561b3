use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use credentials::PasswordHasher;
use credentials::TokenIssuer;

use crate::account::errors::AccountError;
use crate::account::models::RegisterCommand;
use crate::account::models::User;
use crate::account::models::UserId;
use crate::account::models::Username;
use crate::account::ports::AccountRepository;
use crate::account::ports::AuthServicePort;

/// Domain service implementation for authentication operations.
///
/// Concrete implementation of AuthServicePort with dependency injection.
/// Orchestrates the password hasher, the token issuer, and the credential
/// store; holds no per-request state.
pub struct AccountService<R>
where
    R: AccountRepository,
{
    repository: Arc<R>,
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
}

impl<R> AccountService<R>
where
    R: AccountRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store implementation
    /// * `token_issuer` - Token issuer built from the process-wide secret
    pub fn new(repository: Arc<R>, token_issuer: TokenIssuer) -> Self {
        Self {
            repository,
            password_hasher: PasswordHasher::new(),
            token_issuer,
        }
    }
}

#[async_trait]
impl<R> AuthServicePort for AccountService<R>
where
    R: AccountRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<User, AccountError> {
        let password_hash = self.password_hasher.hash(&command.password)?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            password_hash,
            role: command.role,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;

        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn login(&self, username: &str, password: &str) -> Result<String, AccountError> {
        // An unparseable username cannot belong to any account, so it is
        // reported exactly like a failed password check.
        let username = Username::new(username.to_string())
            .map_err(|_| AccountError::InvalidCredentials)?;

        let user = self
            .repository
            .find_by_username(&username)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        let is_valid = self
            .password_hasher
            .verify(password, &user.password_hash)?;

        if !is_valid {
            return Err(AccountError::InvalidCredentials);
        }

        let token = self
            .token_issuer
            .issue(&user.id.to_string(), user.role.as_str())?;

        Ok(token)
    }

    async fn list_users(&self) -> Result<Vec<User>, AccountError> {
        self.repository.list_all().await
    }

    async fn get_user(&self, id: &UserId) -> Result<User, AccountError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))
    }
}
