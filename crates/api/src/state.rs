use std::sync::Arc;

use projectit_events::{EmailDelivery, Notifier};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: projectit_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Preference-gated notification fan-out.
    pub notifier: Arc<Notifier>,
    /// SMTP mailer for the `send-email` function. `None` when SMTP is not
    /// configured.
    pub mailer: Option<Arc<EmailDelivery>>,
}
