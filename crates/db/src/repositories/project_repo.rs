//! Repository for the `projects` table.

use projectit_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, client_id, name, description, status, halopsa_ticket_id, \
                       manager_user_id, is_archived, created_at, updated_at";

/// Provides CRUD and reconciliation lookups for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// If `status` is `None` in the input, defaults to `planning`.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (client_id, name, description, status, halopsa_ticket_id, manager_user_id)
             VALUES ($1, $2, $3, COALESCE($4, 'planning'), $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(input.client_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.status)
            .bind(&input.halopsa_ticket_id)
            .bind(input.manager_user_id)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the project claiming the given external ticket id.
    ///
    /// At most one project should carry a given ticket id; duplicates are a
    /// latent data-quality risk, so the lowest id is taken as authoritative.
    pub async fn find_by_halopsa_ticket_id(
        pool: &PgPool,
        ticket_id: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE halopsa_ticket_id = $1 ORDER BY id LIMIT 1"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(ticket_id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects ordered by most recently created first.
    ///
    /// Archived projects are excluded unless `include_archived` is set.
    pub async fn list(pool: &PgPool, include_archived: bool) -> Result<Vec<Project>, sqlx::Error> {
        let filter = if include_archived {
            ""
        } else {
            "WHERE is_archived = false"
        };
        let query = format!("SELECT {COLUMNS} FROM projects {filter} ORDER BY created_at DESC");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                client_id = COALESCE($2, client_id),
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                status = COALESCE($5, status),
                halopsa_ticket_id = COALESCE($6, halopsa_ticket_id),
                manager_user_id = COALESCE($7, manager_user_id),
                is_archived = COALESCE($8, is_archived),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(input.client_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.status)
            .bind(&input.halopsa_ticket_id)
            .bind(input.manager_user_id)
            .bind(input.is_archived)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
