//! Integration settings singleton model and DTO.
//!
//! One row (id = 1) holds per-integration enable flags, credentials, and
//! inbound webhook secrets. Mutated only via the admin API; read by every
//! webhook handler on each request.

use projectit_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The singleton row from the `integration_settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct IntegrationSettings {
    pub id: DbId,
    pub halopsa_enabled: bool,
    pub halopsa_base_url: Option<String>,
    pub halopsa_api_key: Option<String>,
    pub halopsa_webhook_secret: Option<String>,
    pub quoteit_enabled: bool,
    pub quoteit_base_url: Option<String>,
    pub quoteit_api_key: Option<String>,
    pub quoteit_webhook_secret: Option<String>,
    pub hudu_enabled: bool,
    pub hudu_base_url: Option<String>,
    pub hudu_api_key: Option<String>,
    pub quickbooks_enabled: bool,
    pub quickbooks_realm_id: Option<String>,
    pub quickbooks_access_token: Option<String>,
    pub esign_webhook_secret: Option<String>,
    pub updated_at: Timestamp,
}

/// DTO for updating integration settings. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateIntegrationSettings {
    pub halopsa_enabled: Option<bool>,
    pub halopsa_base_url: Option<String>,
    pub halopsa_api_key: Option<String>,
    pub halopsa_webhook_secret: Option<String>,
    pub quoteit_enabled: Option<bool>,
    pub quoteit_base_url: Option<String>,
    pub quoteit_api_key: Option<String>,
    pub quoteit_webhook_secret: Option<String>,
    pub hudu_enabled: Option<bool>,
    pub hudu_base_url: Option<String>,
    pub hudu_api_key: Option<String>,
    pub quickbooks_enabled: Option<bool>,
    pub quickbooks_realm_id: Option<String>,
    pub quickbooks_access_token: Option<String>,
    pub esign_webhook_secret: Option<String>,
}
