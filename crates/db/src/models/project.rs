//! Project entity model and DTOs.

use projectit_core::status::ProjectStatus;
use projectit_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub client_id: Option<DbId>,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    /// External ticket id used as the reconciliation join key.
    pub halopsa_ticket_id: Option<String>,
    pub manager_user_id: Option<DbId>,
    pub is_archived: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub client_id: Option<DbId>,
    pub name: String,
    pub description: Option<String>,
    /// Defaults to `planning` if omitted.
    pub status: Option<ProjectStatus>,
    pub halopsa_ticket_id: Option<String>,
    pub manager_user_id: Option<DbId>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub client_id: Option<DbId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub halopsa_ticket_id: Option<String>,
    pub manager_user_id: Option<DbId>,
    pub is_archived: Option<bool>,
}
