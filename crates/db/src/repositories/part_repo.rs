//! Repository for the `parts` table.

use projectit_core::types::DbId;
use sqlx::PgPool;

use crate::models::part::{CreatePart, Part, UpdatePart};

const COLUMNS: &str = "id, project_id, name, sku, quantity, unit_cost_cents, \
                       created_at, updated_at";

/// Provides CRUD operations for parts/inventory.
pub struct PartRepo;

impl PartRepo {
    /// Insert a new part, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePart) -> Result<Part, sqlx::Error> {
        let query = format!(
            "INSERT INTO parts (project_id, name, sku, quantity, unit_cost_cents)
             VALUES ($1, $2, $3, COALESCE($4, 0), COALESCE($5, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Part>(&query)
            .bind(input.project_id)
            .bind(&input.name)
            .bind(&input.sku)
            .bind(input.quantity)
            .bind(input.unit_cost_cents)
            .fetch_one(pool)
            .await
    }

    /// Find a part by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Part>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM parts WHERE id = $1");
        sqlx::query_as::<_, Part>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all parts, optionally filtered by project.
    pub async fn list(pool: &PgPool, project_id: Option<DbId>) -> Result<Vec<Part>, sqlx::Error> {
        match project_id {
            Some(pid) => {
                let query =
                    format!("SELECT {COLUMNS} FROM parts WHERE project_id = $1 ORDER BY name");
                sqlx::query_as::<_, Part>(&query)
                    .bind(pid)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!("SELECT {COLUMNS} FROM parts ORDER BY name");
                sqlx::query_as::<_, Part>(&query).fetch_all(pool).await
            }
        }
    }

    /// Update a part. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePart,
    ) -> Result<Option<Part>, sqlx::Error> {
        let query = format!(
            "UPDATE parts SET
                project_id = COALESCE($2, project_id),
                name = COALESCE($3, name),
                sku = COALESCE($4, sku),
                quantity = COALESCE($5, quantity),
                unit_cost_cents = COALESCE($6, unit_cost_cents),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Part>(&query)
            .bind(id)
            .bind(input.project_id)
            .bind(&input.name)
            .bind(&input.sku)
            .bind(input.quantity)
            .bind(input.unit_cost_cents)
            .fetch_optional(pool)
            .await
    }

    /// Delete a part by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM parts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
