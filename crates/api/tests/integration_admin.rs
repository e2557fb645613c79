//! Integration tests for `/api/v1/admin/integrations`: the settings
//! singleton, secret rotation, and its interaction with webhook auth.

mod common;

use axum::http::{Method, StatusCode};
use common::{api_get, api_request_json, body_json, post_json_with_headers};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn settings_singleton_is_readable_and_partially_updatable(pool: PgPool) {
    let app = common::build_test_app(pool);

    let initial = body_json(api_get(app.clone(), "/api/v1/admin/integrations").await).await;
    assert_eq!(initial["data"]["id"], 1);
    assert_eq!(initial["data"]["halopsa_enabled"], false);

    let updated = body_json(
        api_request_json(
            app.clone(),
            Method::PUT,
            "/api/v1/admin/integrations",
            json!({"halopsa_enabled": true, "halopsa_base_url": "https://halo.example.com"}),
        )
        .await,
    )
    .await;
    assert_eq!(updated["data"]["halopsa_enabled"], true);
    assert_eq!(updated["data"]["halopsa_base_url"], "https://halo.example.com");
    // Untouched integrations are unaffected.
    assert_eq!(updated["data"]["quoteit_enabled"], false);

    let reread = body_json(api_get(app, "/api/v1/admin/integrations").await).await;
    assert_eq!(reread["data"]["halopsa_enabled"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn rotated_secret_is_returned_once_and_authenticates_webhooks(pool: PgPool) {
    let app = common::build_test_app(pool);

    api_request_json(
        app.clone(),
        Method::PUT,
        "/api/v1/admin/integrations",
        json!({"halopsa_enabled": true}),
    )
    .await;

    let response = api_request_json(
        app.clone(),
        Method::POST,
        "/api/v1/admin/integrations/halopsa/rotate-secret",
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let rotated = body_json(response).await;
    let secret = rotated["data"]["secret"].as_str().unwrap().to_string();
    assert_eq!(secret.len(), 40);

    // The stored secret matches what the rotation returned...
    let settings = body_json(api_get(app.clone(), "/api/v1/admin/integrations").await).await;
    assert_eq!(settings["data"]["halopsa_webhook_secret"], secret);

    // ...and a webhook presenting it authenticates.
    let response = post_json_with_headers(
        app.clone(),
        "/webhook/halopsa",
        json!({"event_type": "ticket.closed", "ticket_id": "42"}),
        &[("x-webhook-secret", &secret)],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Rotating again invalidates the old secret.
    api_request_json(
        app.clone(),
        Method::POST,
        "/api/v1/admin/integrations/halopsa/rotate-secret",
        json!({}),
    )
    .await;
    let response = post_json_with_headers(
        app,
        "/webhook/halopsa",
        json!({"event_type": "ticket.closed", "ticket_id": "42"}),
        &[("x-webhook-secret", &secret)],
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn rotation_is_limited_to_webhook_integrations(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = api_request_json(
        app,
        Method::POST,
        "/api/v1/admin/integrations/hudu/rotate-secret",
        json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn connection_test_rejects_unknown_integrations(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = api_request_json(
        app,
        Method::POST,
        "/api/v1/admin/integrations/sharepoint/test",
        json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn connection_test_reports_unconfigured_integrations(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = api_request_json(
        app,
        Method::POST,
        "/api/v1/admin/integrations/halopsa/test",
        json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["ok"], false);
}
