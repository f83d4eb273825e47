//! Authentication Handlers
//!
//! Successful register, login and refresh also set the access token as an
//! HttpOnly cookie; the logout handlers clear it.

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::application::dto::{
    AuthResponse, LoginRequest, LogoutAllResponse, RefreshTokenRequest, RegisterRequest,
    TokenResponse,
};
use crate::application::services::AuthError;
use crate::config::Settings;
use crate::presentation::http::extractors::ValidatedJson;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

fn auth_cookie(settings: &Settings, token: String) -> Cookie<'static> {
    Cookie::build((settings.cookie.name.clone(), token))
        .http_only(true)
        .same_site(SameSite::Strict)
        .path("/")
        .secure(settings.cookie.secure)
        .max_age(time::Duration::minutes(
            settings.jwt.access_token_expiry_minutes,
        ))
        .build()
}

/// Expired, empty cookie that makes the browser drop the token.
fn cleared_cookie(settings: &Settings) -> Cookie<'static> {
    Cookie::build((settings.cookie.name.clone(), ""))
        .http_only(true)
        .same_site(SameSite::Strict)
        .path("/")
        .secure(settings.cookie.secure)
        .max_age(time::Duration::ZERO)
        .build()
}

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(body): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, CookieJar, Json<AuthResponse>), AppError> {
    let (user, tokens) = state
        .auth
        .register(&body.name, &body.email, &body.password)
        .await?;

    let jar = jar.add(auth_cookie(&state.settings, tokens.access_token.clone()));

    Ok((
        StatusCode::CREATED,
        jar,
        Json(AuthResponse::new("User registered successfully", user, tokens)),
    ))
}

/// Login with credentials
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(body): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let (user, tokens) = state.auth.authenticate(&body.email, &body.password).await?;

    let jar = jar.add(auth_cookie(&state.settings, tokens.access_token.clone()));

    Ok((jar, Json(AuthResponse::new("Login successful", user, tokens))))
}

/// Exchange a refresh token for a new pair
pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(body): ValidatedJson<RefreshTokenRequest>,
) -> Result<(CookieJar, Json<TokenResponse>), AppError> {
    let tokens = state.auth.refresh_token(&body.refresh_token).await?;

    let jar = jar.add(auth_cookie(&state.settings, tokens.access_token.clone()));

    Ok((jar, Json(TokenResponse::from(tokens))))
}

/// Logout (revoke refresh token). Unknown tokens are not an error.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(body): ValidatedJson<RefreshTokenRequest>,
) -> Result<(StatusCode, CookieJar), AppError> {
    match state.auth.revoke_token(&body.refresh_token).await {
        Ok(()) | Err(AuthError::SessionNotFound) => {}
        Err(e) => return Err(e.into()),
    }

    Ok((StatusCode::NO_CONTENT, jar.add(cleared_cookie(&state.settings))))
}

/// Revoke every session of the current user
pub async fn logout_all(
    State(state): State<AppState>,
    auth_user: AuthUser,
    jar: CookieJar,
) -> Result<(CookieJar, Json<LogoutAllResponse>), AppError> {
    let revoked = state.auth.revoke_all_sessions(auth_user.user_id).await?;

    Ok((
        jar.add(cleared_cookie(&state.settings)),
        Json(LogoutAllResponse {
            message: "Logged out from all sessions".to_string(),
            revoked,
        }),
    ))
}
