//! Activity log entry model and DTO.

use projectit_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// An append-only row from the `activity_log` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityEntry {
    pub id: DbId,
    pub project_id: Option<DbId>,
    pub entity_type: String,
    pub entity_id: DbId,
    pub action: String,
    pub actor: String,
    pub details: serde_json::Value,
    pub created_at: Timestamp,
}

/// Input for appending an activity entry. Constructed in code, never
/// deserialized from clients.
#[derive(Debug, Clone)]
pub struct NewActivity<'a> {
    pub project_id: Option<DbId>,
    pub entity_type: &'a str,
    pub entity_id: DbId,
    pub action: &'a str,
    pub actor: &'a str,
    pub details: serde_json::Value,
}
