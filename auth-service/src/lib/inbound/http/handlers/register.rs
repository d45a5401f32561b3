use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::sanitize_store_error;
use super::ApiError;
use crate::account::errors::AccountError;
use crate::account::errors::RoleError;
use crate::account::errors::UsernameError;
use crate::account::models::RegisterCommand;
use crate::account::models::Role;
use crate::account::models::Username;
use crate::account::ports::AccountRepository;
use crate::account::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn register<R: AccountRepository>(
    State(state): State<AppState<R>>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponseData>), ApiError> {
    let command = body.try_into_command()?;

    state
        .auth_service
        .register(command)
        .await
        .map_err(|e| match e {
            AccountError::UsernameTaken(_) => {
                ApiError::bad_request("User registration failed", "username already taken")
            }
            other => ApiError::bad_request(
                "User registration failed",
                sanitize_store_error("register", &other),
            ),
        })?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponseData {
            message: "User created successfully".to_string(),
        }),
    ))
}

/// HTTP request body for registration (raw JSON).
///
/// Fields are optional at the serde layer so a missing field surfaces as a
/// 400 validation response instead of a framework rejection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    username: Option<String>,
    password: Option<String>,
    role: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("username is required")]
    MissingUsername,

    #[error("password is required")]
    MissingPassword,

    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid role: {0}")]
    Role(#[from] RoleError),
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        let username = self
            .username
            .ok_or(ParseRegisterRequestError::MissingUsername)?;
        let username = Username::new(username)?;

        let password = self
            .password
            .filter(|p| !p.is_empty())
            .ok_or(ParseRegisterRequestError::MissingPassword)?;

        let role = match self.role {
            Some(role) => role.parse::<Role>()?,
            None => Role::default(),
        };

        Ok(RegisterCommand::new(username, password, role))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::bad_request("User registration failed", err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub message: String,
}
