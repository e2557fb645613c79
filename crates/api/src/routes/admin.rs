//! Route definitions for administrative endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::integration_admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET  /integrations                         -> get_settings
/// PUT  /integrations                         -> update_settings
/// POST /integrations/{name}/test             -> test_connection
/// POST /integrations/{name}/rotate-secret    -> rotate_secret
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/integrations",
            get(integration_admin::get_settings).put(integration_admin::update_settings),
        )
        .route(
            "/integrations/{name}/test",
            post(integration_admin::test_connection),
        )
        .route(
            "/integrations/{name}/rotate-secret",
            post(integration_admin::rotate_secret),
        )
}
