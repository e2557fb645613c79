//! Route definitions for the `/parts` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::part;
use crate::state::AppState;

/// Routes mounted at `/parts`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(part::list).post(part::create))
        .route(
            "/{id}",
            get(part::get_by_id).put(part::update).delete(part::delete),
        )
}
