//! Digest notification scheduler.
//!
//! [`DigestScheduler`] runs as a background task, periodically checking for
//! users whose digest window has elapsed, aggregating their queued digest
//! notifications into a single email, and marking them delivered.

use std::time::Duration;

use projectit_core::channels::CHANNEL_DIGEST;
use projectit_core::types::DbId;
use projectit_db::repositories::{NotificationRepo, NotificationSettingsRepo, UserRepo};
use projectit_db::DbPool;
use tokio_util::sync::CancellationToken;

use crate::delivery::email::EmailDelivery;

/// How often the scheduler polls for due digests.
const DIGEST_CHECK_INTERVAL: Duration = Duration::from_secs(3600);

// ---------------------------------------------------------------------------
// DigestScheduler
// ---------------------------------------------------------------------------

/// Background service that processes digest notifications on a periodic basis.
pub struct DigestScheduler {
    pool: DbPool,
    email: Option<EmailDelivery>,
}

impl DigestScheduler {
    /// Create a new scheduler. Without an `EmailDelivery`, digests are still
    /// marked delivered (the in-app list remains the record) but no mail is
    /// sent.
    pub fn new(pool: DbPool, email: Option<EmailDelivery>) -> Self {
        Self { pool, email }
    }

    /// Run the digest scheduler loop.
    ///
    /// Checks every hour for users due for digest delivery. The loop exits
    /// gracefully when the provided [`CancellationToken`] is cancelled.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(DIGEST_CHECK_INTERVAL);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Digest scheduler cancelled");
                    break;
                }
                _ = interval.tick() => {
                    if let Err(e) = self.process_digests().await {
                        tracing::error!(error = %e, "Failed to process digests");
                    }
                }
            }
        }
    }

    /// Find all users due for a digest and process each one.
    pub async fn process_digests(&self) -> Result<(), sqlx::Error> {
        let due_settings = NotificationSettingsRepo::list_users_due_for_digest(&self.pool).await?;

        for settings in &due_settings {
            if let Err(e) = self.send_digest(settings.user_id).await {
                tracing::error!(
                    user_id = settings.user_id,
                    error = %e,
                    "Failed to send digest for user"
                );
            }
        }

        if !due_settings.is_empty() {
            tracing::info!(count = due_settings.len(), "Processed digest deliveries");
        }

        Ok(())
    }

    /// Deliver a digest for a single user.
    async fn send_digest(&self, user_id: DbId) -> Result<(), sqlx::Error> {
        let pending =
            NotificationRepo::list_pending_for_channel(&self.pool, user_id, CHANNEL_DIGEST).await?;

        if pending.is_empty() {
            return Ok(());
        }

        if let Some(mailer) = &self.email {
            if let Some(user) = UserRepo::find_by_id(&self.pool, user_id).await? {
                let mut body = format!("You have {} pending notifications:\n\n", pending.len());
                for n in &pending {
                    body.push_str(&format!("- {}: {}\n", n.title, n.body));
                }
                if let Err(e) = mailer.deliver(&user.email, "Notification digest", &body).await {
                    // Failed delivery leaves the notifications pending so the
                    // next cycle retries them.
                    tracing::warn!(user_id, error = %e, "Digest email failed");
                    return Ok(());
                }
            }
        }

        NotificationRepo::mark_channel_delivered(&self.pool, user_id, CHANNEL_DIGEST).await?;
        NotificationSettingsRepo::mark_digest_sent(&self.pool, user_id).await?;

        tracing::info!(user_id, notification_count = pending.len(), "Digest delivered");

        Ok(())
    }
}
