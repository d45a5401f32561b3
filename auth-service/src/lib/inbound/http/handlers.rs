use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use serde_json::json;

use crate::account::errors::AccountError;
use crate::account::models::Role;
use crate::account::models::User;

pub mod get_user;
pub mod list_users;
pub mod login;
pub mod register;

/// Public error responses.
///
/// Write-path failures and validation problems render as
/// `400 {"message", "error"}`, read-path store failures as
/// `500 {"message", "error"}`; bad credentials and missing records carry a
/// message only. The `error` field is always a sanitized detail string; raw
/// persistence errors are logged server-side and never serialized here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest { message: String, error: String },
    Unauthorized { message: String },
    NotFound { message: String },
    Internal { message: String, error: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            error: error.into(),
        }
    }

    pub fn internal(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            error: error.into(),
        }
    }

    pub fn invalid_credentials() -> Self {
        Self::Unauthorized {
            message: "Invalid credentials".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest { message, error } => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": message, "error": error })),
            )
                .into_response(),
            ApiError::Unauthorized { message } => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": message })),
            )
                .into_response(),
            ApiError::NotFound { message } => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
            }
            ApiError::Internal { message, error } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": message, "error": error })),
            )
                .into_response(),
        }
    }
}

/// Log the raw error and return the sanitized detail for the response body.
pub(crate) fn sanitize_store_error(operation: &str, err: &AccountError) -> String {
    tracing::error!(error = %err, operation, "Persistence operation failed");
    "storage failure".to_string()
}

/// User record as exposed over HTTP.
///
/// The password hash is deliberately absent from this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub username: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.as_str().to_string(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}
