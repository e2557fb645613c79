//! Repository for the `integration_settings` singleton.

use sqlx::PgPool;

use crate::models::integration::{IntegrationSettings, UpdateIntegrationSettings};

/// The fixed primary key of the singleton row.
const SINGLETON_ID: i64 = 1;

const COLUMNS: &str = "id, halopsa_enabled, halopsa_base_url, halopsa_api_key, \
                       halopsa_webhook_secret, quoteit_enabled, quoteit_base_url, \
                       quoteit_api_key, quoteit_webhook_secret, hudu_enabled, \
                       hudu_base_url, hudu_api_key, quickbooks_enabled, \
                       quickbooks_realm_id, quickbooks_access_token, \
                       esign_webhook_secret, updated_at";

/// Read/update access to the integration settings row.
pub struct IntegrationSettingsRepo;

impl IntegrationSettingsRepo {
    /// Fetch the singleton row, creating it if the seed insert is missing.
    pub async fn get(pool: &PgPool) -> Result<IntegrationSettings, sqlx::Error> {
        let query = format!(
            "INSERT INTO integration_settings (id) VALUES ($1)
             ON CONFLICT (id) DO UPDATE SET id = EXCLUDED.id
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, IntegrationSettings>(&query)
            .bind(SINGLETON_ID)
            .fetch_one(pool)
            .await
    }

    /// Update the singleton. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        input: &UpdateIntegrationSettings,
    ) -> Result<IntegrationSettings, sqlx::Error> {
        let query = format!(
            "UPDATE integration_settings SET
                halopsa_enabled = COALESCE($2, halopsa_enabled),
                halopsa_base_url = COALESCE($3, halopsa_base_url),
                halopsa_api_key = COALESCE($4, halopsa_api_key),
                halopsa_webhook_secret = COALESCE($5, halopsa_webhook_secret),
                quoteit_enabled = COALESCE($6, quoteit_enabled),
                quoteit_base_url = COALESCE($7, quoteit_base_url),
                quoteit_api_key = COALESCE($8, quoteit_api_key),
                quoteit_webhook_secret = COALESCE($9, quoteit_webhook_secret),
                hudu_enabled = COALESCE($10, hudu_enabled),
                hudu_base_url = COALESCE($11, hudu_base_url),
                hudu_api_key = COALESCE($12, hudu_api_key),
                quickbooks_enabled = COALESCE($13, quickbooks_enabled),
                quickbooks_realm_id = COALESCE($14, quickbooks_realm_id),
                quickbooks_access_token = COALESCE($15, quickbooks_access_token),
                esign_webhook_secret = COALESCE($16, esign_webhook_secret),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, IntegrationSettings>(&query)
            .bind(SINGLETON_ID)
            .bind(input.halopsa_enabled)
            .bind(&input.halopsa_base_url)
            .bind(&input.halopsa_api_key)
            .bind(&input.halopsa_webhook_secret)
            .bind(input.quoteit_enabled)
            .bind(&input.quoteit_base_url)
            .bind(&input.quoteit_api_key)
            .bind(&input.quoteit_webhook_secret)
            .bind(input.hudu_enabled)
            .bind(&input.hudu_base_url)
            .bind(&input.hudu_api_key)
            .bind(input.quickbooks_enabled)
            .bind(&input.quickbooks_realm_id)
            .bind(&input.quickbooks_access_token)
            .bind(&input.esign_webhook_secret)
            .fetch_one(pool)
            .await
    }
}
