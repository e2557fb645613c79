//! Static admin-token authentication for the management API.
//!
//! End-user authentication is delegated to an external provider; the backend
//! itself only gates its management surfaces (`/api/v1`, `/functions`) behind
//! a single pre-shared token carried in the `x-api-token` header. Validation
//! is an exact string match against `ADMIN_API_TOKEN`. When no token is
//! configured, every request to these surfaces is rejected.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use projectit_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the admin API token.
pub const API_TOKEN_HEADER: &str = "x-api-token";

/// Middleware that rejects requests without a valid admin API token.
pub async fn require_api_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let expected = state.config.admin_api_token.as_deref().ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized(
            "Admin API token is not configured".into(),
        ))
    })?;

    let presented = request
        .headers()
        .get(API_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(format!(
                "Missing {API_TOKEN_HEADER} header"
            )))
        })?;

    if presented != expected {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid API token".into(),
        )));
    }

    Ok(next.run(request).await)
}
