//! Integration tests for the e-signature callback webhook: token lookup,
//! signature recording, and the proposal activity trail.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json_with_headers};
use projectit_core::status::ProposalStatus;
use projectit_db::models::client::CreateClient;
use projectit_db::models::integration::UpdateIntegrationSettings;
use projectit_db::models::project::CreateProject;
use projectit_db::models::proposal::{CreateProposal, Proposal};
use projectit_db::repositories::{
    ActivityLogRepo, ClientRepo, IntegrationSettingsRepo, ProjectRepo, ProposalRepo,
};
use serde_json::json;
use sqlx::PgPool;

const SECRET: &str = "esign-shared-secret";

async fn set_esign_secret(pool: &PgPool) {
    IntegrationSettingsRepo::update(
        pool,
        &UpdateIntegrationSettings {
            esign_webhook_secret: Some(SECRET.to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
}

async fn seed_proposal(pool: &PgPool, project_id: Option<i64>) -> Proposal {
    let client = ClientRepo::create(
        pool,
        &CreateClient {
            name: "Acme".to_string(),
            contact_email: None,
            phone: None,
        },
    )
    .await
    .unwrap();
    ProposalRepo::create(
        pool,
        &CreateProposal {
            client_id: client.id,
            project_id,
            title: "Firewall rollout".to_string(),
            amount_cents: Some(80_000),
            external_quote_id: None,
        },
    )
    .await
    .unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn wrong_secret_is_rejected_with_401(pool: PgPool) {
    set_esign_secret(&pool).await;
    let proposal = seed_proposal(&pool, None).await;
    let app = common::build_test_app(pool);

    let response = post_json_with_headers(
        app,
        "/webhook/proposal",
        json!({"event_type": "proposal.signed", "public_token": proposal.public_token}),
        &[("x-webhook-secret", "wrong")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn signed_event_records_the_signature(pool: PgPool) {
    set_esign_secret(&pool).await;
    let project = ProjectRepo::create(
        &pool,
        &CreateProject {
            client_id: None,
            name: "Rollout".to_string(),
            description: None,
            status: None,
            halopsa_ticket_id: None,
            manager_user_id: None,
        },
    )
    .await
    .unwrap();
    let proposal = seed_proposal(&pool, Some(project.id)).await;
    let app = common::build_test_app(pool.clone());

    let response = post_json_with_headers(
        app,
        "/webhook/proposal",
        json!({
            "event_type": "proposal.signed",
            "public_token": proposal.public_token,
            "signer_name": "Pat Doe",
            "signer_email": "pat@acme.example",
        }),
        &[("x-webhook-secret", SECRET)],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);

    let reloaded = ProposalRepo::find_by_id(&pool, proposal.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.status, ProposalStatus::Signed);
    assert_eq!(reloaded.signer_name.as_deref(), Some("Pat Doe"));
    assert_eq!(reloaded.signer_email.as_deref(), Some("pat@acme.example"));
    assert!(reloaded.signed_at.is_some());

    let entries = ActivityLogRepo::list_for_project(&pool, project.id, 10, 0)
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, "proposal_signed");
    assert_eq!(entries[0].actor, "esign_webhook");
    assert_eq!(entries[0].entity_type, "proposal");
    assert_eq!(entries[0].entity_id, proposal.id);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn viewed_event_does_not_touch_signer_fields(pool: PgPool) {
    set_esign_secret(&pool).await;
    let proposal = seed_proposal(&pool, None).await;
    let app = common::build_test_app(pool.clone());

    let response = post_json_with_headers(
        app,
        "/webhook/proposal",
        json!({"event_type": "proposal.viewed", "public_token": proposal.public_token}),
        &[("x-webhook-secret", SECRET)],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let reloaded = ProposalRepo::find_by_id(&pool, proposal.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.status, ProposalStatus::Viewed);
    assert!(reloaded.signer_name.is_none());
    assert!(reloaded.signed_at.is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn repeated_event_with_no_changes_is_acknowledged(pool: PgPool) {
    set_esign_secret(&pool).await;
    let proposal = seed_proposal(&pool, None).await;
    let app = common::build_test_app(pool.clone());

    let payload = json!({"event_type": "proposal.viewed", "public_token": proposal.public_token});
    let first = post_json_with_headers(
        app.clone(),
        "/webhook/proposal",
        payload.clone(),
        &[("x-webhook-secret", SECRET)],
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = post_json_with_headers(
        app,
        "/webhook/proposal",
        payload,
        &[("x-webhook-secret", SECRET)],
    )
    .await;
    assert_eq!(second.status(), StatusCode::OK);
    let json = body_json(second).await;
    assert_eq!(json["message"], "no changes");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_token_is_acknowledged_as_success(pool: PgPool) {
    set_esign_secret(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json_with_headers(
        app,
        "/webhook/proposal",
        json!({
            "event_type": "proposal.signed",
            "public_token": "7b6d1f9e-9c43-4c5c-9f63-2f3a8f0f2e31",
        }),
        &[("x-webhook-secret", SECRET)],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "no matching proposal");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_payload_is_acknowledged_as_failure(pool: PgPool) {
    set_esign_secret(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json_with_headers(
        app,
        "/webhook/proposal",
        json!({"event_type": "proposal.signed", "public_token": "not-a-uuid"}),
        &[("x-webhook-secret", SECRET)],
    )
    .await;

    // Auth passed, so the malformed body is reported in the ack, not a 4xx.
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "invalid payload");
}
