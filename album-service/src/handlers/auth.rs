use axum::{Json, extract::State, response::IntoResponse};
use service_core::error::AppError;

use crate::dtos::LoginRequest;
use crate::startup::AppState;
use crate::utils::AppJson;

/// Login with username and password, returning an opaque bearer token.
pub async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let res = state.auth.login(&req)?;
    Ok(Json(res))
}
