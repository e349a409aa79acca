use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::user::{RegisterRequest, UserResponse};
use crate::services::user_service;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    operation_id = "registerUser",
    summary = "Register a user",
    description = "Creates an account. Username and password must both be at least 3 characters and the username must be unused.",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid or duplicate username, or short password", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = user_service(&state.db, &state.config.auth)
        .register(payload)
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    operation_id = "listUsers",
    summary = "List all users",
    description = "Returns every user with the blogs they created.",
    responses(
        (status = 200, description = "All users", body = Vec<UserResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = user_service(&state.db, &state.config.auth).list().await?;
    Ok(Json(users))
}
