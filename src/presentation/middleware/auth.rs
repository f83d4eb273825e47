//! Authentication Middleware
//!
//! JWT validation for protected routes. The access token is read from the
//! `Authorization: Bearer` header, falling back to the auth cookie.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::shared::error::AppError;
use crate::startup::AppState;

/// Authenticated user extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
}

/// Authentication middleware that validates JWT tokens
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(request.headers(), &state.settings.cookie.name)?;

    let user_id = state.auth.validate_token(&token)?;

    request.extensions_mut().insert(AuthUser { user_id });

    Ok(next.run(request).await)
}

/// Pull the access token out of the request. A present but malformed
/// `Authorization` header is an error even if the cookie is set.
fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Result<String, AppError> {
    if let Some(value) = headers.get(AUTHORIZATION) {
        return value
            .to_str()
            .ok()
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_owned)
            .ok_or_else(|| AppError::Unauthorized("Invalid authorization header format".into()));
    }

    CookieJar::from_headers(headers)
        .get(cookie_name)
        .map(|cookie| cookie.value().to_owned())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Missing authentication token".into()))
}
