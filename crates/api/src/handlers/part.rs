//! Handlers for the `/parts` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use projectit_core::error::CoreError;
use projectit_core::types::DbId;
use projectit_db::models::part::{CreatePart, Part, UpdatePart};
use projectit_db::repositories::PartRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /parts`.
#[derive(Debug, Deserialize)]
pub struct ListPartsQuery {
    /// Restrict the listing to parts allocated to one project.
    pub project_id: Option<DbId>,
}

/// POST /api/v1/parts
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreatePart>,
) -> AppResult<(StatusCode, Json<DataResponse<Part>>)> {
    let part = PartRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: part })))
}

/// GET /api/v1/parts
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListPartsQuery>,
) -> AppResult<Json<DataResponse<Vec<Part>>>> {
    let parts = PartRepo::list(&state.pool, params.project_id).await?;
    Ok(Json(DataResponse { data: parts }))
}

/// GET /api/v1/parts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Part>>> {
    let part = PartRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Part", id }))?;
    Ok(Json(DataResponse { data: part }))
}

/// PUT /api/v1/parts/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePart>,
) -> AppResult<Json<DataResponse<Part>>> {
    let part = PartRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Part", id }))?;
    Ok(Json(DataResponse { data: part }))
}

/// DELETE /api/v1/parts/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = PartRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Part", id }))
    }
}
