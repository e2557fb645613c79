//! Proposal entity model and DTOs.

use projectit_core::status::ProposalStatus;
use projectit_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A proposal row from the `proposals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Proposal {
    pub id: DbId,
    pub client_id: DbId,
    pub project_id: Option<DbId>,
    pub title: String,
    pub amount_cents: i64,
    pub status: ProposalStatus,
    /// Quote id in the external quoting tool (QuoteIT), when imported.
    pub external_quote_id: Option<String>,
    /// Opaque token embedded in the e-signature link; the signing service
    /// echoes it back in webhook callbacks.
    pub public_token: Uuid,
    pub signer_name: Option<String>,
    pub signer_email: Option<String>,
    pub signed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new proposal.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProposal {
    pub client_id: DbId,
    pub project_id: Option<DbId>,
    pub title: String,
    pub amount_cents: Option<i64>,
    pub external_quote_id: Option<String>,
}

/// DTO for updating an existing proposal. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProposal {
    pub project_id: Option<DbId>,
    pub title: Option<String>,
    pub amount_cents: Option<i64>,
    pub status: Option<ProposalStatus>,
    pub external_quote_id: Option<String>,
}
