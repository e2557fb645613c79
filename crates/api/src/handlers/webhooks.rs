//! Inbound webhook handlers for HaloPSA, QuoteIT, and the e-signature
//! service.
//!
//! Every handler follows the same shape: authenticate the shared secret
//! (reject with 401 before touching the payload), parse, route the event
//! type, locate the local record, diff the reported fields against it, and
//! apply the sparse update plus one activity entry. After authentication the
//! HTTP status is always 200: missing records and internal failures are
//! reported in the [`WebhookAck`] body so the sender never retries.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use projectit_core::activity::{actions, actors};
use projectit_core::status::{ProjectStatus, ProposalStatus};
use projectit_db::models::activity::NewActivity;
use projectit_db::models::integration::IntegrationSettings;
use projectit_db::models::project::UpdateProject;
use projectit_db::models::proposal::UpdateProposal;
use projectit_db::repositories::{
    ActivityLogRepo, IntegrationSettingsRepo, ProjectRepo, ProposalRepo,
};
use projectit_events::notify::{KIND_PROJECT_STATUS, KIND_PROPOSAL};
use projectit_events::NotifyRequest;
use projectit_integrations::auth::SECRET_HEADER;
use projectit_integrations::esign::{EsignEvent, EsignPayload};
use projectit_integrations::halopsa::{map_ticket_status, TicketEvent, TicketPayload};
use projectit_integrations::quoteit::{map_quote_status, QuoteEvent, QuotePayload};
use projectit_integrations::{route, verify_shared_secret, Diff, Routed, WebhookAck};
use serde::Deserialize;

use crate::state::AppState;

/// Query parameters accepted by every webhook endpoint.
#[derive(Debug, Deserialize)]
pub struct WebhookQuery {
    /// Secret fallback for senders that cannot set custom headers.
    pub token: Option<String>,
}

type WebhookResponse = (StatusCode, Json<WebhookAck>);

// ---------------------------------------------------------------------------
// Shared plumbing
// ---------------------------------------------------------------------------

/// Load settings and check the presented secret against the configured one.
///
/// Returns the settings row on success so handlers do not re-fetch it.
async fn authenticate(
    state: &AppState,
    headers: &HeaderMap,
    query: &WebhookQuery,
    pick_secret: impl Fn(&IntegrationSettings) -> Option<&str>,
) -> Result<IntegrationSettings, WebhookResponse> {
    let settings = match IntegrationSettingsRepo::get(&state.pool).await {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load integration settings");
            return Err(ack_failed("internal error"));
        }
    };

    let header_secret = headers.get(SECRET_HEADER).and_then(|v| v.to_str().ok());

    if let Err(e) = verify_shared_secret(
        pick_secret(&settings),
        header_secret,
        query.token.as_deref(),
    ) {
        tracing::warn!(error = %e, "Webhook authentication failed");
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(WebhookAck::failed(e.to_string())),
        ));
    }

    Ok(settings)
}

/// Deserialize the payload, acknowledging malformed bodies instead of
/// bouncing them back for a retry.
fn parse_payload<T: serde::de::DeserializeOwned>(body: &Bytes) -> Result<T, WebhookResponse> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::warn!(error = %e, "Malformed webhook payload");
        ack_failed("invalid payload")
    })
}

fn ack_ok(ack: WebhookAck) -> WebhookResponse {
    (StatusCode::OK, Json(ack))
}

fn ack_failed(message: &str) -> WebhookResponse {
    (StatusCode::OK, Json(WebhookAck::failed(message)))
}

/// Collapse a processing result into the always-200 acknowledgment.
fn finish(result: Result<WebhookAck, sqlx::Error>) -> WebhookResponse {
    match result {
        Ok(ack) => ack_ok(ack),
        Err(e) => {
            tracing::error!(error = %e, "Webhook processing failed");
            ack_failed("internal error")
        }
    }
}

// ---------------------------------------------------------------------------
// HaloPSA tickets
// ---------------------------------------------------------------------------

/// POST /webhook/halopsa
pub async fn halopsa(
    State(state): State<AppState>,
    Query(query): Query<WebhookQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> WebhookResponse {
    let auth = authenticate(&state, &headers, &query, |s| {
        s.halopsa_enabled
            .then_some(s.halopsa_webhook_secret.as_deref())
            .flatten()
    })
    .await;
    if let Err(response) = auth {
        return response;
    }

    let payload: TicketPayload = match parse_payload(&body) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    let event = match route::<TicketEvent>(&payload.event_type) {
        Routed::Known(event) => event,
        Routed::Unknown => {
            tracing::info!(event_type = %payload.event_type, "Ignoring unknown ticket event");
            return ack_ok(WebhookAck::ok_with("ignored unrecognized event type"));
        }
    };

    finish(process_ticket(&state, event, &payload).await)
}

async fn process_ticket(
    state: &AppState,
    event: TicketEvent,
    payload: &TicketPayload,
) -> Result<WebhookAck, sqlx::Error> {
    let Some(project) =
        ProjectRepo::find_by_halopsa_ticket_id(&state.pool, &payload.ticket_id).await?
    else {
        tracing::info!(ticket_id = %payload.ticket_id, "No project for ticket");
        return Ok(WebhookAck::ok_with("no matching project"));
    };

    // A closed ticket completes the project regardless of the status code.
    let external_status = match event {
        TicketEvent::Closed => Some(ProjectStatus::Completed),
        TicketEvent::Updated | TicketEvent::StatusChanged => {
            payload.status.and_then(map_ticket_status)
        }
    };

    let local_description = project.description.clone().unwrap_or_default();
    let mut diff = Diff::new();
    diff.stage("name", &project.name, payload.summary.as_ref());
    diff.stage("description", &local_description, payload.details.as_ref());
    diff.stage("status", &project.status, external_status.as_ref());

    if diff.is_empty() {
        return Ok(WebhookAck::ok_with("no changes"));
    }

    let status_changed = diff.contains("status");
    let update = UpdateProject {
        name: diff
            .contains("name")
            .then(|| payload.summary.clone())
            .flatten(),
        description: diff
            .contains("description")
            .then(|| payload.details.clone())
            .flatten(),
        status: status_changed.then_some(external_status).flatten(),
        ..Default::default()
    };
    ProjectRepo::update(&state.pool, project.id, &update).await?;

    let action = if status_changed {
        actions::STATUS_CHANGED
    } else {
        actions::FIELDS_RECONCILED
    };
    ActivityLogRepo::append(
        &state.pool,
        &NewActivity {
            project_id: Some(project.id),
            entity_type: "project",
            entity_id: project.id,
            action,
            actor: actors::HALOPSA_WEBHOOK,
            details: diff.into_details(),
        },
    )
    .await?;

    if status_changed {
        if let (Some(manager), Some(new_status)) = (project.manager_user_id, external_status) {
            let title = format!("Project status changed: {}", project.name);
            let body = format!("\"{}\" is now {}.", project.name, new_status.as_str());
            notify_quietly(
                state,
                &NotifyRequest {
                    user_id: manager,
                    kind: KIND_PROJECT_STATUS,
                    title: &title,
                    body: &body,
                    entity_type: Some("project"),
                    entity_id: Some(project.id),
                },
            )
            .await;
        }
    }

    Ok(WebhookAck::ok())
}

// ---------------------------------------------------------------------------
// QuoteIT quotes
// ---------------------------------------------------------------------------

/// POST /webhook/quoteit
pub async fn quoteit(
    State(state): State<AppState>,
    Query(query): Query<WebhookQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> WebhookResponse {
    let auth = authenticate(&state, &headers, &query, |s| {
        s.quoteit_enabled
            .then_some(s.quoteit_webhook_secret.as_deref())
            .flatten()
    })
    .await;
    if let Err(response) = auth {
        return response;
    }

    let payload: QuotePayload = match parse_payload(&body) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    let event = match route::<QuoteEvent>(&payload.event_type) {
        Routed::Known(event) => event,
        Routed::Unknown => {
            tracing::info!(event_type = %payload.event_type, "Ignoring unknown quote event");
            return ack_ok(WebhookAck::ok_with("ignored unrecognized event type"));
        }
    };

    finish(process_quote(&state, event, &payload).await)
}

async fn process_quote(
    state: &AppState,
    event: QuoteEvent,
    payload: &QuotePayload,
) -> Result<WebhookAck, sqlx::Error> {
    let Some(proposal) =
        ProposalRepo::find_by_external_quote_id(&state.pool, &payload.quote_id).await?
    else {
        tracing::info!(quote_id = %payload.quote_id, "No proposal for quote");
        return Ok(WebhookAck::ok_with("no matching proposal"));
    };

    // An explicit status string wins; unmapped strings are dropped. Without
    // one, the event itself implies the transition.
    let external_status = match &payload.status {
        Some(status) => map_quote_status(status),
        None => Some(match event {
            QuoteEvent::Sent => ProposalStatus::Sent,
            QuoteEvent::Accepted => ProposalStatus::Signed,
            QuoteEvent::Declined => ProposalStatus::Declined,
        }),
    };

    let mut diff = Diff::new();
    diff.stage("title", &proposal.title, payload.title.as_ref());
    diff.stage(
        "amount_cents",
        &proposal.amount_cents,
        payload.total_cents.as_ref(),
    );
    diff.stage("status", &proposal.status, external_status.as_ref());

    if diff.is_empty() {
        return Ok(WebhookAck::ok_with("no changes"));
    }

    let status_changed = diff.contains("status");
    let update = UpdateProposal {
        title: diff
            .contains("title")
            .then(|| payload.title.clone())
            .flatten(),
        amount_cents: diff.contains("amount_cents").then_some(payload.total_cents).flatten(),
        status: status_changed.then_some(external_status).flatten(),
        ..Default::default()
    };
    ProposalRepo::update(&state.pool, proposal.id, &update).await?;

    let action = if status_changed {
        actions::STATUS_CHANGED
    } else {
        actions::FIELDS_RECONCILED
    };
    ActivityLogRepo::append(
        &state.pool,
        &NewActivity {
            project_id: proposal.project_id,
            entity_type: "proposal",
            entity_id: proposal.id,
            action,
            actor: actors::QUOTEIT_WEBHOOK,
            details: diff.into_details(),
        },
    )
    .await?;

    if status_changed {
        if let Some(new_status) = external_status {
            let title = format!("Proposal updated: {}", proposal.title);
            let body = format!("\"{}\" is now {}.", proposal.title, new_status.as_str());
            notify_project_manager(state, proposal.project_id, proposal.id, &title, &body).await?;
        }
    }

    Ok(WebhookAck::ok())
}

// ---------------------------------------------------------------------------
// E-signature callbacks
// ---------------------------------------------------------------------------

/// POST /webhook/proposal
pub async fn esign(
    State(state): State<AppState>,
    Query(query): Query<WebhookQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> WebhookResponse {
    let auth = authenticate(&state, &headers, &query, |s| {
        s.esign_webhook_secret.as_deref()
    })
    .await;
    if let Err(response) = auth {
        return response;
    }

    let payload: EsignPayload = match parse_payload(&body) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    let event = match route::<EsignEvent>(&payload.event_type) {
        Routed::Known(event) => event,
        Routed::Unknown => {
            tracing::info!(event_type = %payload.event_type, "Ignoring unknown proposal event");
            return ack_ok(WebhookAck::ok_with("ignored unrecognized event type"));
        }
    };

    finish(process_esign(&state, event, &payload).await)
}

async fn process_esign(
    state: &AppState,
    event: EsignEvent,
    payload: &EsignPayload,
) -> Result<WebhookAck, sqlx::Error> {
    let Some(proposal) =
        ProposalRepo::find_by_public_token(&state.pool, payload.public_token).await?
    else {
        tracing::info!(public_token = %payload.public_token, "No proposal for token");
        return Ok(WebhookAck::ok_with("no matching proposal"));
    };

    let new_status = match event {
        EsignEvent::Viewed => ProposalStatus::Viewed,
        EsignEvent::Signed => ProposalStatus::Signed,
        EsignEvent::Declined => ProposalStatus::Declined,
    };

    let local_signer_name = proposal.signer_name.clone().unwrap_or_default();
    let local_signer_email = proposal.signer_email.clone().unwrap_or_default();
    let mut diff = Diff::new();
    diff.stage("status", &proposal.status, Some(&new_status));
    diff.stage("signer_name", &local_signer_name, payload.signer_name.as_ref());
    diff.stage(
        "signer_email",
        &local_signer_email,
        payload.signer_email.as_ref(),
    );

    if diff.is_empty() {
        return Ok(WebhookAck::ok_with("no changes"));
    }

    let status_changed = diff.contains("status");
    ProposalRepo::record_signature(
        &state.pool,
        proposal.id,
        new_status,
        payload.signer_name.as_deref(),
        payload.signer_email.as_deref(),
    )
    .await?;

    let action = match event {
        EsignEvent::Viewed => actions::PROPOSAL_VIEWED,
        EsignEvent::Signed => actions::PROPOSAL_SIGNED,
        EsignEvent::Declined => actions::PROPOSAL_DECLINED,
    };
    ActivityLogRepo::append(
        &state.pool,
        &NewActivity {
            project_id: proposal.project_id,
            entity_type: "proposal",
            entity_id: proposal.id,
            action,
            actor: actors::ESIGN_WEBHOOK,
            details: diff.into_details(),
        },
    )
    .await?;

    if status_changed {
        let title = match event {
            EsignEvent::Viewed => format!("Proposal viewed: {}", proposal.title),
            EsignEvent::Signed => format!("Proposal signed: {}", proposal.title),
            EsignEvent::Declined => format!("Proposal declined: {}", proposal.title),
        };
        let body = match payload.signer_name.as_deref() {
            Some(name) => format!("\"{}\" was {} by {name}.", proposal.title, new_status.as_str()),
            None => format!("\"{}\" is now {}.", proposal.title, new_status.as_str()),
        };
        notify_project_manager(state, proposal.project_id, proposal.id, &title, &body).await?;
    }

    Ok(WebhookAck::ok())
}

// ---------------------------------------------------------------------------
// Notification helpers
// ---------------------------------------------------------------------------

/// Notify the manager of the project a proposal is linked to, if any.
async fn notify_project_manager(
    state: &AppState,
    project_id: Option<projectit_core::types::DbId>,
    proposal_id: projectit_core::types::DbId,
    title: &str,
    body: &str,
) -> Result<(), sqlx::Error> {
    let Some(project_id) = project_id else {
        return Ok(());
    };
    let Some(project) = ProjectRepo::find_by_id(&state.pool, project_id).await? else {
        return Ok(());
    };
    let Some(manager) = project.manager_user_id else {
        return Ok(());
    };

    notify_quietly(
        state,
        &NotifyRequest {
            user_id: manager,
            kind: KIND_PROPOSAL,
            title,
            body,
            entity_type: Some("proposal"),
            entity_id: Some(proposal_id),
        },
    )
    .await;
    Ok(())
}

/// Send a notification, logging instead of propagating failures: a broken
/// notification pipeline must not fail the reconciliation that triggered it.
async fn notify_quietly(state: &AppState, req: &NotifyRequest<'_>) {
    if let Err(e) = state.notifier.notify(req).await {
        tracing::error!(user_id = req.user_id, kind = req.kind, error = %e, "Notification failed");
    }
}
