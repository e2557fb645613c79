//! Repository for per-user notification settings.

use projectit_core::types::DbId;
use sqlx::PgPool;

use crate::models::notification::{NotificationSettings, UpdateNotificationSettings};

const COLUMNS: &str = "id, user_id, notify_due_soon, notify_overdue, notify_project_status, \
                       notify_proposal, email_enabled, digest_enabled, digest_interval_hours, \
                       digest_last_sent_at, reminder_window_days, created_at, updated_at";

/// Read/update access to notification settings. Rows are created lazily with
/// defaults the first time a user's settings are touched.
pub struct NotificationSettingsRepo;

impl NotificationSettingsRepo {
    /// Fetch a user's settings row, if one exists.
    pub async fn get(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<NotificationSettings>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notification_settings WHERE user_id = $1");
        sqlx::query_as::<_, NotificationSettings>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch a user's settings row, creating it with defaults if missing.
    pub async fn get_or_create(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<NotificationSettings, sqlx::Error> {
        let query = format!(
            "INSERT INTO notification_settings (user_id) VALUES ($1)
             ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NotificationSettings>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Fetch settings for a batch of users in one query. Used by the
    /// reminder sweep to avoid per-task lookups.
    pub async fn get_for_users(
        pool: &PgPool,
        user_ids: &[DbId],
    ) -> Result<Vec<NotificationSettings>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notification_settings WHERE user_id = ANY($1)"
        );
        sqlx::query_as::<_, NotificationSettings>(&query)
            .bind(user_ids)
            .fetch_all(pool)
            .await
    }

    /// Update a user's settings. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdateNotificationSettings,
    ) -> Result<NotificationSettings, sqlx::Error> {
        // Ensure the row exists so a first-time PUT behaves like an upsert.
        Self::get_or_create(pool, user_id).await?;

        let query = format!(
            "UPDATE notification_settings SET
                notify_due_soon = COALESCE($2, notify_due_soon),
                notify_overdue = COALESCE($3, notify_overdue),
                notify_project_status = COALESCE($4, notify_project_status),
                notify_proposal = COALESCE($5, notify_proposal),
                email_enabled = COALESCE($6, email_enabled),
                digest_enabled = COALESCE($7, digest_enabled),
                digest_interval_hours = COALESCE($8, digest_interval_hours),
                reminder_window_days = COALESCE($9, reminder_window_days),
                updated_at = NOW()
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NotificationSettings>(&query)
            .bind(user_id)
            .bind(input.notify_due_soon)
            .bind(input.notify_overdue)
            .bind(input.notify_project_status)
            .bind(input.notify_proposal)
            .bind(input.email_enabled)
            .bind(input.digest_enabled)
            .bind(input.digest_interval_hours)
            .bind(input.reminder_window_days)
            .fetch_one(pool)
            .await
    }

    /// List users whose digest window has elapsed and who have pending
    /// digest notifications.
    pub async fn list_users_due_for_digest(
        pool: &PgPool,
    ) -> Result<Vec<NotificationSettings>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notification_settings s \
             WHERE s.digest_enabled = true \
               AND (s.digest_last_sent_at IS NULL \
                    OR s.digest_last_sent_at < NOW() - (s.digest_interval_hours * INTERVAL '1 hour')) \
               AND EXISTS (SELECT 1 FROM notifications n \
                           WHERE n.user_id = s.user_id \
                             AND n.channel = 'digest' \
                             AND n.is_delivered = false)"
        );
        sqlx::query_as::<_, NotificationSettings>(&query)
            .fetch_all(pool)
            .await
    }

    /// Record that a digest was just sent for the user.
    pub async fn mark_digest_sent(pool: &PgPool, user_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE notification_settings SET digest_last_sent_at = NOW() WHERE user_id = $1",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
