//! User Handlers

use axum::{extract::State, Json};

use crate::application::dto::UserResponse;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Get the authenticated user
pub async fn get_current_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.auth.get_current_user(auth_user.user_id).await?;

    Ok(Json(UserResponse::from(user)))
}
