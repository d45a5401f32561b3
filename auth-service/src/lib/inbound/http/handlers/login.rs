use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::sanitize_store_error;
use super::ApiError;
use crate::account::errors::AccountError;
use crate::account::ports::AccountRepository;
use crate::account::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn login<R: AccountRepository>(
    State(state): State<AppState<R>>,
    Json(body): Json<LoginRequestBody>,
) -> Result<Json<LoginResponseData>, ApiError> {
    // Missing fields fall through to the credential check and fail there,
    // so every bad-credential shape gets the same 401.
    let username = body.username.unwrap_or_default();
    let password = body.password.unwrap_or_default();

    let token = state
        .auth_service
        .login(&username, &password)
        .await
        .map_err(|e| match e {
            AccountError::InvalidCredentials => ApiError::invalid_credentials(),
            other => {
                ApiError::bad_request("Login failed", sanitize_store_error("login", &other))
            }
        })?;

    Ok(Json(LoginResponseData { token }))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    username: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
}
