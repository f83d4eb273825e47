//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::{auth_middleware, metrics::track_metrics};
use crate::startup::AppState;

/// Largest accepted request body (1 MiB)
pub const MAX_BODY_BYTES: usize = 1_048_576;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes(state.clone()))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::from_fn(track_metrics))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// API v1 routes
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes(state.clone()))
        .nest("/users", user_routes(state.clone()))
        .nest("/guns", gun_routes(state))
}

/// Authentication routes. Only logout-all needs a token.
fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/refresh", post(handlers::auth::refresh_token))
        .route("/logout", post(handlers::auth::logout))
        .route(
            "/logout-all",
            post(handlers::auth::logout_all)
                .route_layer(middleware::from_fn_with_state(state, auth_middleware)),
        )
}

/// User routes (protected)
fn user_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/me", get(handlers::user::get_current_user))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Gun routes. Reads are public; writes require authentication.
fn gun_routes(state: AppState) -> Router<AppState> {
    let auth = middleware::from_fn_with_state(state, auth_middleware);

    Router::new()
        .route(
            "/",
            get(handlers::gun::list_guns)
                .merge(post(handlers::gun::create_gun).route_layer(auth.clone())),
        )
        .route(
            "/{id}",
            get(handlers::gun::get_gun).merge(
                put(handlers::gun::replace_gun)
                    .patch(handlers::gun::update_gun)
                    .delete(handlers::gun::delete_gun)
                    .route_layer(auth),
            ),
        )
}
