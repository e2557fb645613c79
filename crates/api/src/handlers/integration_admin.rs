//! Handlers for `/admin/integrations`: the settings singleton, live
//! connection tests, and webhook secret rotation.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use projectit_core::activity::{actions, actors};
use projectit_core::error::CoreError;
use projectit_db::models::activity::NewActivity;
use projectit_db::models::integration::UpdateIntegrationSettings;
use projectit_db::repositories::{ActivityLogRepo, IntegrationSettingsRepo};
use projectit_integrations::connection::{self, IntegrationKind};
use rand::distr::Alphanumeric;
use rand::Rng;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Length of generated webhook secrets.
const SECRET_LEN: usize = 40;

/// GET /api/v1/admin/integrations
pub async fn get_settings(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let settings = IntegrationSettingsRepo::get(&state.pool).await?;
    Ok(Json(DataResponse { data: settings }))
}

/// PUT /api/v1/admin/integrations
///
/// Partial update; the activity entry records which fields were touched but
/// never their values, since several of them are credentials.
pub async fn update_settings(
    State(state): State<AppState>,
    Json(input): Json<UpdateIntegrationSettings>,
) -> AppResult<impl IntoResponse> {
    let changed = changed_fields(&input);
    let settings = IntegrationSettingsRepo::update(&state.pool, &input).await?;

    ActivityLogRepo::append(
        &state.pool,
        &NewActivity {
            project_id: None,
            entity_type: "integration_settings",
            entity_id: settings.id,
            action: actions::SETTINGS_CHANGED,
            actor: actors::ADMIN_API,
            details: serde_json::json!({ "fields": changed }),
        },
    )
    .await?;

    Ok(Json(DataResponse { data: settings }))
}

/// POST /api/v1/admin/integrations/{name}/test
///
/// Single outbound probe; raw error text is surfaced in the response body.
pub async fn test_connection(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let kind = IntegrationKind::from_slug(&name).ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!(
            "Unknown integration: {name}"
        )))
    })?;

    let settings = IntegrationSettingsRepo::get(&state.pool).await?;

    let (base_url, api_key) = match kind {
        IntegrationKind::HaloPsa => (
            settings.halopsa_base_url.as_deref(),
            settings.halopsa_api_key.as_deref(),
        ),
        IntegrationKind::QuoteIt => (
            settings.quoteit_base_url.as_deref(),
            settings.quoteit_api_key.as_deref(),
        ),
        IntegrationKind::Hudu => (
            settings.hudu_base_url.as_deref(),
            settings.hudu_api_key.as_deref(),
        ),
        // QuickBooks has no standalone base URL setting; the probe reports
        // it as unconfigured.
        IntegrationKind::QuickBooks => (None, settings.quickbooks_access_token.as_deref()),
    };

    let result = connection::probe(base_url, api_key).await;
    tracing::info!(integration = kind.as_slug(), ok = result.ok, "Connection test");

    Ok(Json(DataResponse { data: result }))
}

/// POST /api/v1/admin/integrations/{name}/rotate-secret
///
/// Generates a fresh random webhook secret for `halopsa`, `quoteit`, or
/// `esign` and returns it once; the caller must configure the sender with it.
pub async fn rotate_secret(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let secret = generate_secret();

    let mut input = UpdateIntegrationSettings::default();
    match name.as_str() {
        "halopsa" => input.halopsa_webhook_secret = Some(secret.clone()),
        "quoteit" => input.quoteit_webhook_secret = Some(secret.clone()),
        "esign" => input.esign_webhook_secret = Some(secret.clone()),
        other => {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Integration {other} has no webhook secret"
            ))));
        }
    }

    let settings = IntegrationSettingsRepo::update(&state.pool, &input).await?;

    ActivityLogRepo::append(
        &state.pool,
        &NewActivity {
            project_id: None,
            entity_type: "integration_settings",
            entity_id: settings.id,
            action: actions::SETTINGS_CHANGED,
            actor: actors::ADMIN_API,
            details: serde_json::json!({ "rotated": name }),
        },
    )
    .await?;

    Ok(Json(serde_json::json!({
        "data": { "secret": secret }
    })))
}

/// Generate a fresh alphanumeric webhook secret.
fn generate_secret() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(SECRET_LEN)
        .map(char::from)
        .collect()
}

/// Names of the fields present in a partial settings update.
fn changed_fields(input: &UpdateIntegrationSettings) -> Vec<&'static str> {
    let mut fields = Vec::new();
    macro_rules! track {
        ($($field:ident),* $(,)?) => {
            $(if input.$field.is_some() {
                fields.push(stringify!($field));
            })*
        };
    }
    track!(
        halopsa_enabled,
        halopsa_base_url,
        halopsa_api_key,
        halopsa_webhook_secret,
        quoteit_enabled,
        quoteit_base_url,
        quoteit_api_key,
        quoteit_webhook_secret,
        hudu_enabled,
        hudu_base_url,
        hudu_api_key,
        quickbooks_enabled,
        quickbooks_realm_id,
        quickbooks_access_token,
        esign_webhook_secret,
    );
    fields
}
