use axum::extract::Path;
use axum::extract::State;
use axum::Json;

use super::sanitize_store_error;
use super::ApiError;
use super::UserData;
use crate::account::errors::AccountError;
use crate::account::models::UserId;
use crate::account::ports::AccountRepository;
use crate::account::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn get_user<R: AccountRepository>(
    State(state): State<AppState<R>>,
    Path(user_id): Path<String>,
) -> Result<Json<UserData>, ApiError> {
    let user_id = UserId::from_string(&user_id)
        .map_err(|_| ApiError::bad_request("Failed to fetch user", "malformed user id"))?;

    state
        .auth_service
        .get_user(&user_id)
        .await
        .map_err(|e| match e {
            AccountError::NotFound(_) => ApiError::NotFound {
                message: "User not found".to_string(),
            },
            other => ApiError::internal(
                "Failed to fetch user",
                sanitize_store_error("get_user", &other),
            ),
        })
        .map(|ref user| Json(user.into()))
}
