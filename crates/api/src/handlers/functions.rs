//! RPC-style internal function invocation: `POST /functions/{name}`.
//!
//! Mirrors the external scheduler contract: a cron job or operator hits a
//! named function with an optional JSON body. Unknown names are 404.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::background::reminder_sweep;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of the `send-email` function.
#[derive(Debug, Deserialize)]
pub struct SendEmailRequest {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// POST /functions/{name}
pub async fn invoke(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> AppResult<Response> {
    match name.as_str() {
        "due-date-sweep" => {
            let summary = reminder_sweep::run(&state.pool, &state.notifier).await?;
            Ok(Json(DataResponse { data: summary }).into_response())
        }
        "send-email" => {
            let request: SendEmailRequest = serde_json::from_slice(&body)
                .map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))?;
            send_email(&state, &request).await?;
            Ok(Json(serde_json::json!({ "data": { "sent": true } })).into_response())
        }
        other => {
            tracing::warn!(function = other, "Unknown function invoked");
            Ok((
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({
                    "error": format!("Unknown function: {other}"),
                    "code": "NOT_FOUND",
                })),
            )
                .into_response())
        }
    }
}

/// Relay a one-off email through the configured SMTP transport.
async fn send_email(state: &AppState, request: &SendEmailRequest) -> Result<(), AppError> {
    let mailer = state.mailer.as_ref().ok_or_else(|| {
        AppError::BadRequest("Email delivery is not configured (SMTP_HOST unset)".into())
    })?;

    mailer
        .deliver(&request.to, &request.subject, &request.body)
        .await
        .map_err(|e| AppError::InternalError(format!("Email delivery failed: {e}")))
}
