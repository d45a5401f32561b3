use axum::extract::State;
use axum::Json;

use super::sanitize_store_error;
use super::ApiError;
use super::UserData;
use crate::account::ports::AccountRepository;
use crate::account::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn list_users<R: AccountRepository>(
    State(state): State<AppState<R>>,
) -> Result<Json<Vec<UserData>>, ApiError> {
    let users = state.auth_service.list_users().await.map_err(|e| {
        ApiError::internal(
            "Failed to fetch users",
            sanitize_store_error("list_users", &e),
        )
    })?;

    Ok(Json(users.iter().map(UserData::from).collect()))
}
