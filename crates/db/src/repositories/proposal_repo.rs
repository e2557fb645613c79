//! Repository for the `proposals` table.

use projectit_core::status::ProposalStatus;
use projectit_core::types::DbId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::proposal::{CreateProposal, Proposal, UpdateProposal};

const COLUMNS: &str = "id, client_id, project_id, title, amount_cents, status, \
                       external_quote_id, public_token, signer_name, signer_email, \
                       signed_at, created_at, updated_at";

/// Provides CRUD and reconciliation lookups for proposals.
pub struct ProposalRepo;

impl ProposalRepo {
    /// Insert a new proposal in `draft` status, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProposal) -> Result<Proposal, sqlx::Error> {
        let query = format!(
            "INSERT INTO proposals (client_id, project_id, title, amount_cents, external_quote_id)
             VALUES ($1, $2, $3, COALESCE($4, 0), $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Proposal>(&query)
            .bind(input.client_id)
            .bind(input.project_id)
            .bind(&input.title)
            .bind(input.amount_cents)
            .bind(&input.external_quote_id)
            .fetch_one(pool)
            .await
    }

    /// Find a proposal by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Proposal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM proposals WHERE id = $1");
        sqlx::query_as::<_, Proposal>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the proposal claiming the given external quote id.
    ///
    /// Like the project ticket-id lookup, the lowest id wins when duplicate
    /// claims exist.
    pub async fn find_by_external_quote_id(
        pool: &PgPool,
        quote_id: &str,
    ) -> Result<Option<Proposal>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM proposals WHERE external_quote_id = $1 ORDER BY id LIMIT 1"
        );
        sqlx::query_as::<_, Proposal>(&query)
            .bind(quote_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a proposal by its e-signature public token.
    pub async fn find_by_public_token(
        pool: &PgPool,
        token: Uuid,
    ) -> Result<Option<Proposal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM proposals WHERE public_token = $1");
        sqlx::query_as::<_, Proposal>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// List all proposals, most recent first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Proposal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM proposals ORDER BY created_at DESC");
        sqlx::query_as::<_, Proposal>(&query).fetch_all(pool).await
    }

    /// Update a proposal. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProposal,
    ) -> Result<Option<Proposal>, sqlx::Error> {
        let query = format!(
            "UPDATE proposals SET
                project_id = COALESCE($2, project_id),
                title = COALESCE($3, title),
                amount_cents = COALESCE($4, amount_cents),
                status = COALESCE($5, status),
                external_quote_id = COALESCE($6, external_quote_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Proposal>(&query)
            .bind(id)
            .bind(input.project_id)
            .bind(&input.title)
            .bind(input.amount_cents)
            .bind(input.status)
            .bind(&input.external_quote_id)
            .fetch_optional(pool)
            .await
    }

    /// Record an e-signature outcome: status plus signer details.
    pub async fn record_signature(
        pool: &PgPool,
        id: DbId,
        status: ProposalStatus,
        signer_name: Option<&str>,
        signer_email: Option<&str>,
    ) -> Result<Option<Proposal>, sqlx::Error> {
        let query = format!(
            "UPDATE proposals SET
                status = $2,
                signer_name = COALESCE($3, signer_name),
                signer_email = COALESCE($4, signer_email),
                signed_at = CASE WHEN $2 = 'signed' THEN NOW() ELSE signed_at END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Proposal>(&query)
            .bind(id)
            .bind(status)
            .bind(signer_name)
            .bind(signer_email)
            .fetch_optional(pool)
            .await
    }

    /// Delete a proposal by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM proposals WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
