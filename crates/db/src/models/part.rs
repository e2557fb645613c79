//! Part/inventory entity model and DTOs.

use projectit_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A part row from the `parts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Part {
    pub id: DbId,
    pub project_id: Option<DbId>,
    pub name: String,
    pub sku: Option<String>,
    pub quantity: i32,
    pub unit_cost_cents: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new part.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePart {
    pub project_id: Option<DbId>,
    pub name: String,
    pub sku: Option<String>,
    pub quantity: Option<i32>,
    pub unit_cost_cents: Option<i64>,
}

/// DTO for updating an existing part. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePart {
    pub project_id: Option<DbId>,
    pub name: Option<String>,
    pub sku: Option<String>,
    pub quantity: Option<i32>,
    pub unit_cost_cents: Option<i64>,
}
