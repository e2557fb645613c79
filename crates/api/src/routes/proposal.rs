//! Route definitions for the `/proposals` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::proposal;
use crate::state::AppState;

/// Routes mounted at `/proposals`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(proposal::list).post(proposal::create))
        .route(
            "/{id}",
            get(proposal::get_by_id)
                .put(proposal::update)
                .delete(proposal::delete),
        )
}
