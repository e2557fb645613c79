//! Due-date reminder sweep.
//!
//! Triggered externally via `POST /functions/due-date-sweep` (typically by a
//! cron job). One pass loads every candidate task and the settings of every
//! affected assignee, classifies each due date, and fans out reminders
//! through the [`Notifier`].
//!
//! The sweep carries no idempotence guard: it records nothing about previous
//! runs, so invoking it twice on the same day double-sends every reminder.
//! The scheduler cadence is the only thing preventing duplicates.

use std::collections::HashMap;

use projectit_core::activity::{actions, actors};
use projectit_core::reminders::{classify, DEFAULT_REMINDER_WINDOW_DAYS};
use projectit_core::types::DbId;
use projectit_db::models::activity::NewActivity;
use projectit_db::repositories::{ActivityLogRepo, NotificationSettingsRepo, TaskRepo};
use projectit_db::DbPool;
use projectit_events::{Notifier, NotifyRequest};
use serde::Serialize;

/// Outcome counters for one sweep pass.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SweepSummary {
    /// Candidate tasks examined (non-completed, dated, assigned).
    pub tasks_scanned: usize,
    /// Reminders routed to the notifier (created in-app or queued for
    /// digest). Opt-outs are not counted.
    pub reminders_sent: usize,
}

/// Run one sweep pass against the current date.
pub async fn run(pool: &DbPool, notifier: &Notifier) -> Result<SweepSummary, sqlx::Error> {
    run_for_date(pool, notifier, chrono::Utc::now().date_naive()).await
}

/// Run one sweep pass for an explicit `today`, for deterministic tests.
pub async fn run_for_date(
    pool: &DbPool,
    notifier: &Notifier,
    today: chrono::NaiveDate,
) -> Result<SweepSummary, sqlx::Error> {
    let tasks = TaskRepo::list_due_candidates(pool).await?;

    let mut assignees: Vec<DbId> = tasks.iter().filter_map(|t| t.assignee_user_id).collect();
    assignees.sort_unstable();
    assignees.dedup();

    let windows: HashMap<DbId, i32> = NotificationSettingsRepo::get_for_users(pool, &assignees)
        .await?
        .into_iter()
        .map(|s| (s.user_id, s.reminder_window_days))
        .collect();

    let mut summary = SweepSummary {
        tasks_scanned: tasks.len(),
        ..Default::default()
    };

    for task in &tasks {
        // Both are guaranteed by the candidate query.
        let (Some(assignee), Some(due)) = (task.assignee_user_id, task.due_date) else {
            continue;
        };

        let window = windows
            .get(&assignee)
            .copied()
            .unwrap_or(DEFAULT_REMINDER_WINDOW_DAYS);
        let Some(kind) = classify(today, due, window) else {
            continue;
        };

        let title = match kind {
            projectit_core::reminders::ReminderKind::Overdue => {
                format!("Task overdue: {}", task.title)
            }
            projectit_core::reminders::ReminderKind::DueToday => {
                format!("Task due today: {}", task.title)
            }
            projectit_core::reminders::ReminderKind::DueSoon => {
                format!("Task due soon: {}", task.title)
            }
        };
        let body = format!("\"{}\" is due on {due}.", task.title);

        let outcome = notifier
            .notify(&NotifyRequest {
                user_id: assignee,
                kind: kind.as_str(),
                title: &title,
                body: &body,
                entity_type: Some("task"),
                entity_id: Some(task.id),
            })
            .await;

        match outcome {
            Ok(projectit_events::notify::NotifyOutcome::Skipped) => {}
            Ok(_) => {
                summary.reminders_sent += 1;
                ActivityLogRepo::append(
                    pool,
                    &NewActivity {
                        project_id: Some(task.project_id),
                        entity_type: "task",
                        entity_id: task.id,
                        action: actions::REMINDER_SENT,
                        actor: actors::REMINDER_SWEEP,
                        details: serde_json::json!({
                            "kind": kind.as_str(),
                            "due_date": due.to_string(),
                        }),
                    },
                )
                .await?;
            }
            Err(e) => {
                tracing::error!(task_id = task.id, user_id = assignee, error = %e, "Reminder failed");
            }
        }
    }

    tracing::info!(
        tasks_scanned = summary.tasks_scanned,
        reminders_sent = summary.reminders_sent,
        "Reminder sweep complete"
    );

    Ok(summary)
}
