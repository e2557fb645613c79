//! Repository for the append-only `activity_log` table.
//!
//! Entries are only ever inserted and listed. There is deliberately no
//! update or delete operation here.

use projectit_core::types::DbId;
use sqlx::PgPool;

use crate::models::activity::{ActivityEntry, NewActivity};

const COLUMNS: &str = "id, project_id, entity_type, entity_id, action, actor, details, created_at";

/// Append and list operations for the activity trail.
pub struct ActivityLogRepo;

impl ActivityLogRepo {
    /// Append an entry, returning the created row.
    pub async fn append(
        pool: &PgPool,
        entry: &NewActivity<'_>,
    ) -> Result<ActivityEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO activity_log (project_id, entity_type, entity_id, action, actor, details)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityEntry>(&query)
            .bind(entry.project_id)
            .bind(entry.entity_type)
            .bind(entry.entity_id)
            .bind(entry.action)
            .bind(entry.actor)
            .bind(&entry.details)
            .fetch_one(pool)
            .await
    }

    /// List entries for a project, most recent first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ActivityEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activity_log \
             WHERE project_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, ActivityEntry>(&query)
            .bind(project_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count all entries for a project.
    pub async fn count_for_project(pool: &PgPool, project_id: DbId) -> Result<i64, sqlx::Error> {
        let count: Option<i64> =
            sqlx::query_scalar("SELECT COUNT(*) FROM activity_log WHERE project_id = $1")
                .bind(project_id)
                .fetch_one(pool)
                .await?;
        Ok(count.unwrap_or(0))
    }
}
