//! Notification entity models and DTOs.

use projectit_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    /// Stable kind string, e.g. `task_overdue` or `project_status`.
    pub kind: String,
    pub title: String,
    pub body: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<DbId>,
    pub channel: String,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub is_delivered: bool,
    pub delivered_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// A row from the `notification_settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NotificationSettings {
    pub id: DbId,
    pub user_id: DbId,
    pub notify_due_soon: bool,
    pub notify_overdue: bool,
    pub notify_project_status: bool,
    pub notify_proposal: bool,
    pub email_enabled: bool,
    pub digest_enabled: bool,
    pub digest_interval_hours: i32,
    pub digest_last_sent_at: Option<Timestamp>,
    pub reminder_window_days: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for updating notification settings. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNotificationSettings {
    pub notify_due_soon: Option<bool>,
    pub notify_overdue: Option<bool>,
    pub notify_project_status: Option<bool>,
    pub notify_proposal: Option<bool>,
    pub email_enabled: Option<bool>,
    pub digest_enabled: Option<bool>,
    pub digest_interval_hours: Option<i32>,
    pub reminder_window_days: Option<i32>,
}
