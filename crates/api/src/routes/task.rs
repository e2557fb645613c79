//! Route definitions for the `/tasks` resource.
//!
//! Listing lives under `/projects/{id}/tasks`; tasks always belong to a
//! project, so there is no global task listing.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::task;
use crate::state::AppState;

/// Routes mounted at `/tasks`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(task::create))
        .route(
            "/{id}",
            get(task::get_by_id).put(task::update).delete(task::delete),
        )
}
