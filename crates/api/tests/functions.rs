//! Integration tests for `POST /functions/{name}`: the due-date sweep and
//! the one-off email relay.

mod common;

use axum::http::{Method, StatusCode};
use common::{api_request_json, body_json};
use projectit_db::models::notification::UpdateNotificationSettings;
use projectit_db::models::project::CreateProject;
use projectit_db::models::task::CreateTask;
use projectit_db::models::user::CreateUser;
use projectit_db::repositories::{
    NotificationRepo, NotificationSettingsRepo, ProjectRepo, TaskRepo, UserRepo,
};
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

async fn seed_task(pool: &PgPool, project_id: i64, title: &str, assignee: i64, due: chrono::NaiveDate) {
    TaskRepo::create(
        pool,
        &CreateTask {
            project_id,
            title: title.to_string(),
            description: None,
            status: None,
            assignee_user_id: Some(assignee),
            due_date: Some(due),
        },
    )
    .await
    .unwrap();
}

async fn seed_project(pool: &PgPool) -> i64 {
    ProjectRepo::create(
        pool,
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
    .unwrap()
    .id
}

// ---------------------------------------------------------------------------
// due-date-sweep
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn sweep_sends_reminders_for_overdue_and_due_today_tasks(pool: PgPool) {
    let user = seed_user(&pool, "tech@example.com").await;
    let project = seed_project(&pool).await;
    let today = chrono::Utc::now().date_naive();
    seed_task(&pool, project, "Overdue install", user, today - chrono::Days::new(2)).await;
    seed_task(&pool, project, "Due today install", user, today).await;
    // Well beyond any window: no reminder.
    seed_task(&pool, project, "Far future", user, today + chrono::Days::new(30)).await;
    let app = common::build_test_app(pool.clone());

    let response =
        api_request_json(app, Method::POST, "/functions/due-date-sweep", json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let summary = body_json(response).await;
    assert_eq!(summary["data"]["tasks_scanned"], 3);
    assert_eq!(summary["data"]["reminders_sent"], 2);

    let notifications = NotificationRepo::list_for_user(&pool, user, false, 10, 0)
        .await
        .unwrap();
    assert_eq!(notifications.len(), 2);
    let kinds: Vec<&str> = notifications.iter().map(|n| n.kind.as_str()).collect();
    assert!(kinds.contains(&"task_overdue"));
    assert!(kinds.contains(&"task_due_today"));
    assert!(notifications.iter().all(|n| n.channel == "in_app"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn sweep_has_no_idempotence_guard(pool: PgPool) {
    let user = seed_user(&pool, "tech@example.com").await;
    let project = seed_project(&pool).await;
    let today = chrono::Utc::now().date_naive();
    seed_task(&pool, project, "Overdue install", user, today - chrono::Days::new(1)).await;
    let app = common::build_test_app(pool.clone());

    for _ in 0..2 {
        let response = api_request_json(
            app.clone(),
            Method::POST,
            "/functions/due-date-sweep",
            json!({}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    // Two invocations on the same day mean two copies of the reminder; the
    // scheduler cadence is the only deduplication.
    let notifications = NotificationRepo::list_for_user(&pool, user, false, 10, 0)
        .await
        .unwrap();
    assert_eq!(notifications.len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn digest_users_get_reminders_queued_not_delivered(pool: PgPool) {
    let user = seed_user(&pool, "digest@example.com").await;
    NotificationSettingsRepo::get_or_create(&pool, user).await.unwrap();
    NotificationSettingsRepo::update(
        &pool,
        user,
        &UpdateNotificationSettings {
            digest_enabled: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let project = seed_project(&pool).await;
    let today = chrono::Utc::now().date_naive();
    seed_task(&pool, project, "Overdue install", user, today - chrono::Days::new(1)).await;
    let app = common::build_test_app(pool.clone());

    let response =
        api_request_json(app, Method::POST, "/functions/due-date-sweep", json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let pending = NotificationRepo::list_pending_for_channel(&pool, user, "digest")
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert!(!pending[0].is_delivered);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn opted_out_users_are_skipped_and_not_counted(pool: PgPool) {
    let user = seed_user(&pool, "optout@example.com").await;
    NotificationSettingsRepo::get_or_create(&pool, user).await.unwrap();
    NotificationSettingsRepo::update(
        &pool,
        user,
        &UpdateNotificationSettings {
            notify_overdue: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let project = seed_project(&pool).await;
    let today = chrono::Utc::now().date_naive();
    seed_task(&pool, project, "Overdue install", user, today - chrono::Days::new(1)).await;
    let app = common::build_test_app(pool.clone());

    let response =
        api_request_json(app, Method::POST, "/functions/due-date-sweep", json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let summary = body_json(response).await;
    assert_eq!(summary["data"]["tasks_scanned"], 1);
    assert_eq!(summary["data"]["reminders_sent"], 0);
    assert!(NotificationRepo::list_for_user(&pool, user, false, 10, 0)
        .await
        .unwrap()
        .is_empty());
}

// ---------------------------------------------------------------------------
// send-email / dispatch
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn send_email_without_smtp_is_a_bad_request(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = api_request_json(
        app,
        Method::POST,
        "/functions/send-email",
        json!({"to": "ops@example.com", "subject": "Hi", "body": "Test"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_function_names_return_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response =
        api_request_json(app, Method::POST, "/functions/defrag-disks", json!({})).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn functions_require_the_admin_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = common::post_json_with_headers(
        app,
        "/functions/due-date-sweep",
        json!({}),
        &[],
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
