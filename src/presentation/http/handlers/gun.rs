//! Gun Handlers

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::{
    CreateGunRequest, GunListResponse, GunResponse, ListGunsParams, UpdateGunRequest,
};
use crate::application::services::GunError;
use crate::presentation::http::extractors::{GunId, ValidatedJson};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// List guns with filtering, sorting and pagination
pub async fn list_guns(
    State(state): State<AppState>,
    params: Result<Query<ListGunsParams>, QueryRejection>,
) -> Result<Json<GunListResponse>, AppError> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let query = params
        .into_query(&state.settings.pagination)
        .map_err(GunError::from)?;

    let page = state.guns.list_guns(query).await?;

    Ok(Json(GunListResponse::from(page)))
}

pub async fn get_gun(
    State(state): State<AppState>,
    GunId(id): GunId,
) -> Result<Json<GunResponse>, AppError> {
    let gun = state.guns.get_gun(id).await?;

    Ok(Json(gun.into()))
}

pub async fn create_gun(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateGunRequest>,
) -> Result<(StatusCode, Json<GunResponse>), AppError> {
    let gun = state.guns.create_gun(body.into()).await?;

    Ok((StatusCode::CREATED, Json(gun.into())))
}

/// Replace all fields (PUT)
pub async fn replace_gun(
    State(state): State<AppState>,
    GunId(id): GunId,
    ValidatedJson(body): ValidatedJson<CreateGunRequest>,
) -> Result<Json<GunResponse>, AppError> {
    let gun = state.guns.replace_gun(id, body.into()).await?;

    Ok(Json(gun.into()))
}

/// Update some fields (PATCH)
pub async fn update_gun(
    State(state): State<AppState>,
    GunId(id): GunId,
    ValidatedJson(body): ValidatedJson<UpdateGunRequest>,
) -> Result<Json<GunResponse>, AppError> {
    let gun = state.guns.update_gun(id, body.into()).await?;

    Ok(Json(gun.into()))
}

pub async fn delete_gun(
    State(state): State<AppState>,
    GunId(id): GunId,
) -> Result<StatusCode, AppError> {
    state.guns.delete_gun(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
