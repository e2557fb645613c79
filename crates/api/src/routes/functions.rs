//! Route definitions for internal function invocation.

use axum::middleware::from_fn_with_state;
use axum::routing::post;
use axum::Router;

use crate::handlers::functions;
use crate::middleware::api_token::require_api_token;
use crate::state::AppState;

/// Routes mounted at `/functions`, gated by the admin API token.
///
/// ```text
/// POST /functions/{name}  -> due-date-sweep | send-email
/// ```
pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/functions/{name}", post(functions::invoke))
        .layer(from_fn_with_state(state, require_api_token))
}
