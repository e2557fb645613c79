//! Handlers for the `/projects` resource.
//!
//! Project mutations append to the activity trail, which is also the
//! per-project feed exposed at `/projects/{id}/activity`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use projectit_core::activity::{action_to_category, actions, actors};
use projectit_core::error::CoreError;
use projectit_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use projectit_core::types::DbId;
use projectit_db::models::activity::{ActivityEntry, NewActivity};
use projectit_db::models::project::{CreateProject, Project, UpdateProject};
use projectit_db::models::task::Task;
use projectit_db::repositories::{ActivityLogRepo, ProjectRepo, TaskRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /projects`.
#[derive(Debug, Deserialize)]
pub struct ListProjectsQuery {
    #[serde(default)]
    pub include_archived: bool,
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    let project = ProjectRepo::create(&state.pool, &input).await?;

    ActivityLogRepo::append(
        &state.pool,
        &NewActivity {
            project_id: Some(project.id),
            entity_type: "project",
            entity_id: project.id,
            action: actions::ENTITY_CREATED,
            actor: actors::ADMIN_API,
            details: serde_json::json!({ "name": project.name }),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /api/v1/projects
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListProjectsQuery>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = ProjectRepo::list(&state.pool, params.include_archived).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(DataResponse { data: project }))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    ActivityLogRepo::append(
        &state.pool,
        &NewActivity {
            project_id: Some(project.id),
            entity_type: "project",
            entity_id: project.id,
            action: actions::ENTITY_UPDATED,
            actor: actors::ADMIN_API,
            details: serde_json::Value::Null,
        },
    )
    .await?;

    Ok(Json(DataResponse { data: project }))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = ProjectRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
    }
}

/// GET /api/v1/projects/{id}/tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Task>>>> {
    // 404 for unknown projects rather than an empty list.
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    let tasks = TaskRepo::list_for_project(&state.pool, id).await?;
    Ok(Json(DataResponse { data: tasks }))
}

/// An activity entry annotated with its feed category, so clients can
/// filter reconciliation noise from operator actions.
#[derive(Debug, Serialize)]
pub struct ActivityFeedEntry {
    #[serde(flatten)]
    pub entry: ActivityEntry,
    pub category: &'static str,
}

/// GET /api/v1/projects/{id}/activity
pub async fn list_activity(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<serde_json::Value>> {
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);

    let entries = ActivityLogRepo::list_for_project(&state.pool, id, limit, offset).await?;
    let total = ActivityLogRepo::count_for_project(&state.pool, id).await?;

    let feed: Vec<ActivityFeedEntry> = entries
        .into_iter()
        .map(|entry| ActivityFeedEntry {
            category: action_to_category(&entry.action),
            entry,
        })
        .collect();

    Ok(Json(serde_json::json!({
        "data": feed,
        "total": total,
    })))
}
