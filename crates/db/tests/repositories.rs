//! Integration tests for the repository layer against a real database:
//! - CRUD and partial updates
//! - Reconciliation lookups (external ticket/quote ids, public tokens)
//! - Append-only activity trail ordering
//! - Digest due-user selection

use projectit_core::status::{ProjectStatus, ProposalStatus};
use projectit_db::models::activity::NewActivity;
use projectit_db::models::client::CreateClient;
use projectit_db::models::notification::UpdateNotificationSettings;
use projectit_db::models::project::{CreateProject, UpdateProject};
use projectit_db::models::proposal::CreateProposal;
use projectit_db::models::task::CreateTask;
use projectit_db::models::user::CreateUser;
use projectit_db::repositories::{
    ActivityLogRepo, ClientRepo, IntegrationSettingsRepo, NewNotification,
    NotificationRepo, NotificationSettingsRepo, ProjectRepo, ProposalRepo, TaskRepo, UserRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_project(name: &str, ticket_id: Option<&str>) -> CreateProject {
    CreateProject {
        client_id: None,
        name: name.to_string(),
        description: None,
        status: None,
        halopsa_ticket_id: ticket_id.map(str::to_string),
        manager_user_id: None,
    }
}

async fn seed_user(pool: &PgPool, email: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            name: "Test User".to_string(),
            email: email.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn project_create_defaults_to_planning(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("Server refresh", None))
        .await
        .unwrap();

    assert_eq!(project.status, ProjectStatus::Planning);
    assert!(!project.is_archived);
}

#[sqlx::test(migrations = "./migrations")]
async fn project_partial_update_leaves_other_fields(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("Server refresh", Some("42")))
        .await
        .unwrap();

    let updated = ProjectRepo::update(
        &pool,
        project.id,
        &UpdateProject {
            status: Some(ProjectStatus::InProgress),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.status, ProjectStatus::InProgress);
    assert_eq!(updated.name, "Server refresh");
    assert_eq!(updated.halopsa_ticket_id.as_deref(), Some("42"));
}

#[sqlx::test(migrations = "./migrations")]
async fn ticket_lookup_takes_lowest_id_when_duplicated(pool: PgPool) {
    let first = ProjectRepo::create(&pool, &new_project("First claim", Some("42")))
        .await
        .unwrap();
    let _second = ProjectRepo::create(&pool, &new_project("Second claim", Some("42")))
        .await
        .unwrap();

    let found = ProjectRepo::find_by_halopsa_ticket_id(&pool, "42")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, first.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn archived_projects_are_hidden_by_default(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("Old project", None))
        .await
        .unwrap();
    ProjectRepo::update(
        &pool,
        project.id,
        &UpdateProject {
            is_archived: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert!(ProjectRepo::list(&pool, false).await.unwrap().is_empty());
    assert_eq!(ProjectRepo::list(&pool, true).await.unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Tasks / due candidates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn due_candidates_require_date_assignee_and_live_project(pool: PgPool) {
    let user_id = seed_user(&pool, "tech@example.com").await;
    let project = ProjectRepo::create(&pool, &new_project("Rollout", None))
        .await
        .unwrap();
    let archived = ProjectRepo::create(&pool, &new_project("Shelved", None))
        .await
        .unwrap();
    ProjectRepo::update(
        &pool,
        archived.id,
        &UpdateProject {
            is_archived: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let due = chrono::Utc::now().date_naive();
    // Qualifies.
    TaskRepo::create(
        &pool,
        &CreateTask {
            project_id: project.id,
            title: "Install switch".to_string(),
            description: None,
            status: None,
            assignee_user_id: Some(user_id),
            due_date: Some(due),
        },
    )
    .await
    .unwrap();
    // No assignee.
    TaskRepo::create(
        &pool,
        &CreateTask {
            project_id: project.id,
            title: "Unassigned".to_string(),
            description: None,
            status: None,
            assignee_user_id: None,
            due_date: Some(due),
        },
    )
    .await
    .unwrap();
    // No due date.
    TaskRepo::create(
        &pool,
        &CreateTask {
            project_id: project.id,
            title: "Undated".to_string(),
            description: None,
            status: None,
            assignee_user_id: Some(user_id),
            due_date: None,
        },
    )
    .await
    .unwrap();
    // Archived project.
    TaskRepo::create(
        &pool,
        &CreateTask {
            project_id: archived.id,
            title: "Shelved task".to_string(),
            description: None,
            status: None,
            assignee_user_id: Some(user_id),
            due_date: Some(due),
        },
    )
    .await
    .unwrap();

    let candidates = TaskRepo::list_due_candidates(&pool).await.unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].title, "Install switch");
}

// ---------------------------------------------------------------------------
// Proposals
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn proposal_signature_is_recorded_with_timestamp(pool: PgPool) {
    let client = ClientRepo::create(
        &pool,
        &CreateClient {
            name: "Acme".to_string(),
            contact_email: None,
            phone: None,
        },
    )
    .await
    .unwrap();
    let proposal = ProposalRepo::create(
        &pool,
        &CreateProposal {
            client_id: client.id,
            project_id: None,
            title: "Network upgrade".to_string(),
            amount_cents: Some(250_000),
            external_quote_id: Some("Q-100".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(proposal.status, ProposalStatus::Draft);
    assert!(proposal.signed_at.is_none());

    let signed = ProposalRepo::record_signature(
        &pool,
        proposal.id,
        ProposalStatus::Signed,
        Some("Pat Doe"),
        Some("pat@acme.example"),
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(signed.status, ProposalStatus::Signed);
    assert_eq!(signed.signer_name.as_deref(), Some("Pat Doe"));
    assert!(signed.signed_at.is_some());

    // The quote-id lookup resolves the same row.
    let by_quote = ProposalRepo::find_by_external_quote_id(&pool, "Q-100")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_quote.id, proposal.id);

    let by_token = ProposalRepo::find_by_public_token(&pool, proposal.public_token)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_token.id, proposal.id);
}

// ---------------------------------------------------------------------------
// Activity trail
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn activity_entries_list_newest_first(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("Audit me", None))
        .await
        .unwrap();

    for action in ["entity_created", "status_changed", "fields_reconciled"] {
        ActivityLogRepo::append(
            &pool,
            &NewActivity {
                project_id: Some(project.id),
                entity_type: "project",
                entity_id: project.id,
                action,
                actor: "halopsa_webhook",
                details: serde_json::json!({}),
            },
        )
        .await
        .unwrap();
    }

    let entries = ActivityLogRepo::list_for_project(&pool, project.id, 10, 0)
        .await
        .unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].action, "fields_reconciled");
    assert_eq!(entries[2].action, "entity_created");

    let total = ActivityLogRepo::count_for_project(&pool, project.id)
        .await
        .unwrap();
    assert_eq!(total, 3);
}

// ---------------------------------------------------------------------------
// Notification settings / digest selection
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn settings_rows_are_created_lazily_with_defaults(pool: PgPool) {
    let user_id = seed_user(&pool, "lazy@example.com").await;

    assert!(NotificationSettingsRepo::get(&pool, user_id)
        .await
        .unwrap()
        .is_none());

    let settings = NotificationSettingsRepo::get_or_create(&pool, user_id)
        .await
        .unwrap();
    assert!(settings.notify_due_soon);
    assert!(!settings.digest_enabled);
    assert_eq!(settings.reminder_window_days, 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn digest_due_users_need_pending_notifications(pool: PgPool) {
    let with_pending = seed_user(&pool, "pending@example.com").await;
    let without_pending = seed_user(&pool, "empty@example.com").await;

    for user_id in [with_pending, without_pending] {
        NotificationSettingsRepo::update(
            &pool,
            user_id,
            &UpdateNotificationSettings {
                digest_enabled: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    }

    NotificationRepo::create(
        &pool,
        &NewNotification {
            user_id: with_pending,
            kind: "task_overdue",
            title: "Task overdue",
            body: "A task is overdue",
            entity_type: None,
            entity_id: None,
            channel: "digest",
        },
    )
    .await
    .unwrap();

    let due = NotificationSettingsRepo::list_users_due_for_digest(&pool)
        .await
        .unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].user_id, with_pending);

    // Once delivered and stamped, the user is no longer due.
    NotificationRepo::mark_channel_delivered(&pool, with_pending, "digest")
        .await
        .unwrap();
    NotificationSettingsRepo::mark_digest_sent(&pool, with_pending)
        .await
        .unwrap();
    assert!(NotificationSettingsRepo::list_users_due_for_digest(&pool)
        .await
        .unwrap()
        .is_empty());
}

// ---------------------------------------------------------------------------
// Integration settings singleton
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn integration_settings_singleton_survives_partial_updates(pool: PgPool) {
    let initial = IntegrationSettingsRepo::get(&pool).await.unwrap();
    assert_eq!(initial.id, 1);
    assert!(!initial.halopsa_enabled);

    let updated = IntegrationSettingsRepo::update(
        &pool,
        &projectit_db::models::integration::UpdateIntegrationSettings {
            halopsa_enabled: Some(true),
            halopsa_webhook_secret: Some("s3cret".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(updated.halopsa_enabled);
    assert_eq!(updated.halopsa_webhook_secret.as_deref(), Some("s3cret"));
    // Untouched integrations keep their defaults.
    assert!(!updated.quoteit_enabled);
    assert!(updated.quoteit_webhook_secret.is_none());
}
