//! Route definitions for the `/notifications` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET  /                -> list
/// GET  /unread-count    -> unread_count
/// POST /{id}/read       -> mark_read
/// POST /read-all        -> mark_all_read
/// GET  /settings        -> get_settings
/// PUT  /settings        -> update_settings
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notification::list))
        .route("/unread-count", get(notification::unread_count))
        .route("/{id}/read", post(notification::mark_read))
        .route("/read-all", post(notification::mark_all_read))
        .route(
            "/settings",
            get(notification::get_settings).put(notification::update_settings),
        )
}
