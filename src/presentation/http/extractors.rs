//! Custom Extractors
//!
//! Axum extractors for authentication, validated JSON bodies and path ids.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Request},
    http::{request::Parts, StatusCode},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;

/// Reads the user the auth middleware attached to the request.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or_else(|| AppError::Unauthorized("Missing authentication token".into()))
    }
}

/// JSON body that has been deserialized and passed `validator` checks.
///
/// Syntax errors, wrong types and unknown fields reject with 400, an
/// oversized body with 413, and failed validation with 422.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;

        value.validate().map_err(validation_error)?;

        Ok(Self(value))
    }
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Request body too large".into())
    } else {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Positive integer id from the `{id}` path segment.
#[derive(Debug, Clone, Copy)]
pub struct GunId(pub i64);

impl<S> FromRequestParts<S> for GunId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let invalid = || AppError::BadRequest("Invalid gun ID".into());

        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| invalid())?;

        raw.trim()
            .parse::<i64>()
            .ok()
            .filter(|id| *id >= 1)
            .map(GunId)
            .ok_or_else(invalid)
    }
}
