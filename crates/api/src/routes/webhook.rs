//! Route definitions for the inbound webhook endpoints.
//!
//! Mounted at the root (not under `/api/v1`): the URLs are configured in the
//! external systems and authenticated by shared secret, not the admin token.

use axum::routing::post;
use axum::Router;

use crate::handlers::webhooks;
use crate::state::AppState;

/// Routes mounted at `/webhook`.
///
/// ```text
/// POST /webhook/halopsa   -> HaloPSA ticket events
/// POST /webhook/quoteit   -> QuoteIT quote events
/// POST /webhook/proposal  -> e-signature callbacks
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/webhook/halopsa", post(webhooks::halopsa))
        .route("/webhook/quoteit", post(webhooks::quoteit))
        .route("/webhook/proposal", post(webhooks::esign))
}
