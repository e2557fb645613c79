//! Integration tests for the `/api/v1/notifications` resource: listing,
//! read tracking, and per-user settings.

mod common;

use axum::http::{Method, StatusCode};
use common::{api_get, api_request_json, body_json};
use projectit_db::models::user::CreateUser;
use projectit_db::repositories::{NewNotification, NotificationRepo, UserRepo};
use serde_json::json;
use sqlx::PgPool;

async fn seed_user(pool: &PgPool, email: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            name: "Tech".to_string(),
            email: email.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_notification(pool: &PgPool, user_id: i64, title: &str) -> i64 {
    NotificationRepo::create(
        pool,
        &NewNotification {
            user_id,
            kind: "task_overdue",
            title,
            body: "A task needs attention",
            entity_type: None,
            entity_id: None,
            channel: "in_app",
        },
    )
    .await
    .unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn listing_is_scoped_to_the_requested_user(pool: PgPool) {
    let alice = seed_user(&pool, "alice@example.com").await;
    let bob = seed_user(&pool, "bob@example.com").await;
    seed_notification(&pool, alice, "For Alice").await;
    seed_notification(&pool, bob, "For Bob").await;
    let app = common::build_test_app(pool);

    let response = api_get(app, &format!("/api/v1/notifications?user_id={alice}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "For Alice");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_user_id_is_a_bad_request(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = api_get(app, "/api/v1/notifications").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn read_tracking_flows_through_count_and_mark_endpoints(pool: PgPool) {
    let user = seed_user(&pool, "tech@example.com").await;
    let first = seed_notification(&pool, user, "First").await;
    seed_notification(&pool, user, "Second").await;
    let app = common::build_test_app(pool);

    let count = body_json(
        api_get(
            app.clone(),
            &format!("/api/v1/notifications/unread-count?user_id={user}"),
        )
        .await,
    )
    .await;
    assert_eq!(count["data"]["count"], 2);

    let response = api_request_json(
        app.clone(),
        Method::POST,
        &format!("/api/v1/notifications/{first}/read?user_id={user}"),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Marking the same notification again is a 404, not a silent success.
    let response = api_request_json(
        app.clone(),
        Method::POST,
        &format!("/api/v1/notifications/{first}/read?user_id={user}"),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let remaining = body_json(
        api_request_json(
            app.clone(),
            Method::POST,
            &format!("/api/v1/notifications/read-all?user_id={user}"),
            json!({}),
        )
        .await,
    )
    .await;
    assert_eq!(remaining["data"]["marked_read"], 1);

    let count = body_json(
        api_get(
            app,
            &format!("/api/v1/notifications/unread-count?user_id={user}"),
        )
        .await,
    )
    .await;
    assert_eq!(count["data"]["count"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn mark_read_refuses_other_users_notifications(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com").await;
    let intruder = seed_user(&pool, "intruder@example.com").await;
    let id = seed_notification(&pool, owner, "Private").await;
    let app = common::build_test_app(pool);

    let response = api_request_json(
        app,
        Method::POST,
        &format!("/api/v1/notifications/{id}/read?user_id={intruder}"),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn settings_are_created_on_first_read_and_updatable(pool: PgPool) {
    let user = seed_user(&pool, "tech@example.com").await;
    let app = common::build_test_app(pool);

    let settings = body_json(
        api_get(
            app.clone(),
            &format!("/api/v1/notifications/settings?user_id={user}"),
        )
        .await,
    )
    .await;
    assert_eq!(settings["data"]["digest_enabled"], false);
    assert_eq!(settings["data"]["reminder_window_days"], 3);

    let updated = body_json(
        api_request_json(
            app,
            Method::PUT,
            &format!("/api/v1/notifications/settings?user_id={user}"),
            json!({"digest_enabled": true, "reminder_window_days": 7}),
        )
        .await,
    )
    .await;
    assert_eq!(updated["data"]["digest_enabled"], true);
    assert_eq!(updated["data"]["reminder_window_days"], 7);
    // Untouched preferences keep their defaults.
    assert_eq!(updated["data"]["notify_due_soon"], true);
}
