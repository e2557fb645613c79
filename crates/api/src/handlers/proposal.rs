//! Handlers for the `/proposals` resource.
//!
//! Status transitions driven by external systems (QuoteIT, e-signature)
//! arrive through the webhook handlers, not here.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use projectit_core::error::CoreError;
use projectit_core::types::DbId;
use projectit_db::models::proposal::{CreateProposal, Proposal, UpdateProposal};
use projectit_db::repositories::ProposalRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/proposals
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProposal>,
) -> AppResult<(StatusCode, Json<DataResponse<Proposal>>)> {
    let proposal = ProposalRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: proposal })))
}

/// GET /api/v1/proposals
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Proposal>>>> {
    let proposals = ProposalRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: proposals }))
}

/// GET /api/v1/proposals/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Proposal>>> {
    let proposal = ProposalRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Proposal",
            id,
        }))?;
    Ok(Json(DataResponse { data: proposal }))
}

/// PUT /api/v1/proposals/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProposal>,
) -> AppResult<Json<DataResponse<Proposal>>> {
    let proposal = ProposalRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Proposal",
            id,
        }))?;
    Ok(Json(DataResponse { data: proposal }))
}

/// DELETE /api/v1/proposals/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = ProposalRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Proposal",
            id,
        }))
    }
}
