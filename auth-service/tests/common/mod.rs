use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth_service::domain::account::errors::AccountError;
use auth_service::domain::account::models::User;
use auth_service::domain::account::models::UserId;
use auth_service::domain::account::models::Username;
use auth_service::domain::account::ports::AccountRepository;
use auth_service::domain::account::service::AccountService;
use auth_service::inbound::http::router::create_router;
use credentials::TokenIssuer;

pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// In-memory credential store backing the HTTP tests.
///
/// All operations run under one lock, so duplicate-username checks are
/// atomic the same way the database unique index makes them in production.
pub struct InMemoryAccountRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, user: User) -> Result<User, AccountError> {
        let mut users = self.users.lock().unwrap();

        if users.iter().any(|u| u.username == user.username) {
            return Err(AccountError::UsernameTaken(
                user.username.as_str().to_string(),
            ));
        }

        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AccountError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| &u.username == username).cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AccountError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| &u.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, AccountError> {
        let users = self.users.lock().unwrap();
        Ok(users.clone())
    }
}

/// Test application that spawns a real server on a random port
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub tokens: TokenIssuer,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemoryAccountRepository::new());
        let auth_service = Arc::new(AccountService::new(
            repository,
            TokenIssuer::new(TEST_JWT_SECRET),
        ));

        let router = create_router(auth_service);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            tokens: TokenIssuer::new(TEST_JWT_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }
}
