//! Handlers for the `/notifications` resource.
//!
//! Authentication is delegated to an external provider, so the acting user
//! is identified by an explicit `user_id` query parameter supplied by the
//! trusted frontend (the whole surface sits behind the admin API token).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use projectit_core::error::CoreError;
use projectit_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use projectit_core::types::DbId;
use projectit_db::models::notification::UpdateNotificationSettings;
use projectit_db::repositories::{NotificationRepo, NotificationSettingsRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /notifications`.
#[derive(Debug, Deserialize)]
pub struct NotificationQuery {
    pub user_id: DbId,
    /// If `true`, return only unread notifications. Defaults to `false`.
    pub unread_only: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameter naming the acting user.
#[derive(Debug, Deserialize)]
pub struct UserParam {
    pub user_id: DbId,
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// GET /api/v1/notifications?user_id=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<NotificationQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);
    let unread_only = params.unread_only.unwrap_or(false);

    let notifications =
        NotificationRepo::list_for_user(&state.pool, params.user_id, unread_only, limit, offset)
            .await?;

    Ok(Json(DataResponse {
        data: notifications,
    }))
}

/// GET /api/v1/notifications/unread-count?user_id=
pub async fn unread_count(
    State(state): State<AppState>,
    Query(params): Query<UserParam>,
) -> AppResult<Json<serde_json::Value>> {
    let count = NotificationRepo::unread_count(&state.pool, params.user_id).await?;

    Ok(Json(serde_json::json!({
        "data": { "count": count }
    })))
}

/// POST /api/v1/notifications/{id}/read?user_id=
///
/// Returns 204 on success, 404 if the notification does not belong to the
/// given user or is already read.
pub async fn mark_read(
    State(state): State<AppState>,
    Path(notification_id): Path<DbId>,
    Query(params): Query<UserParam>,
) -> AppResult<impl IntoResponse> {
    let found = NotificationRepo::mark_read(&state.pool, notification_id, params.user_id).await?;

    if !found {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id: notification_id,
        }));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/notifications/read-all?user_id=
///
/// Returns the number of notifications that were marked.
pub async fn mark_all_read(
    State(state): State<AppState>,
    Query(params): Query<UserParam>,
) -> AppResult<Json<serde_json::Value>> {
    let count = NotificationRepo::mark_all_read(&state.pool, params.user_id).await?;

    Ok(Json(serde_json::json!({
        "data": { "marked_read": count }
    })))
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// GET /api/v1/notifications/settings?user_id=
///
/// Creates the row with defaults on first access.
pub async fn get_settings(
    State(state): State<AppState>,
    Query(params): Query<UserParam>,
) -> AppResult<impl IntoResponse> {
    let settings = NotificationSettingsRepo::get_or_create(&state.pool, params.user_id).await?;
    Ok(Json(DataResponse { data: settings }))
}

/// PUT /api/v1/notifications/settings?user_id=
pub async fn update_settings(
    State(state): State<AppState>,
    Query(params): Query<UserParam>,
    Json(input): Json<UpdateNotificationSettings>,
) -> AppResult<impl IntoResponse> {
    let settings = NotificationSettingsRepo::update(&state.pool, params.user_id, &input).await?;
    Ok(Json(DataResponse { data: settings }))
}
