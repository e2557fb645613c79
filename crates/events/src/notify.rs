//! Preference-gated notification fan-out.
//!
//! [`Notifier`] is the single write path for notifications: callers describe
//! what happened and for whom, and the notifier applies the recipient's
//! stored settings (per-kind opt-outs, digest vs instant, email opt-in)
//! before creating rows or sending mail.

use projectit_core::channels::{CHANNEL_DIGEST, CHANNEL_IN_APP};
use projectit_core::types::DbId;
use projectit_db::repositories::{
    NewNotification, NotificationRepo, NotificationSettingsRepo, UserRepo,
};
use projectit_db::DbPool;

use crate::delivery::email::EmailDelivery;

/// Notification kind for project status changes driven by reconciliation.
pub const KIND_PROJECT_STATUS: &str = "project_status";

/// Notification kind for proposal lifecycle events.
pub const KIND_PROPOSAL: &str = "proposal";

// ---------------------------------------------------------------------------
// NotifyRequest / NotifyOutcome
// ---------------------------------------------------------------------------

/// A single notification to be routed to one user.
#[derive(Debug, Clone)]
pub struct NotifyRequest<'a> {
    pub user_id: DbId,
    /// Stable kind string, e.g. `task_overdue` or [`KIND_PROJECT_STATUS`].
    pub kind: &'a str,
    pub title: &'a str,
    pub body: &'a str,
    pub entity_type: Option<&'a str>,
    pub entity_id: Option<DbId>,
}

/// What the notifier did with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// The recipient has opted out of this kind; nothing was created.
    Skipped,
    /// Queued on the digest channel for periodic batch delivery.
    Queued,
    /// Created in-app immediately. `emailed` is true when an instant email
    /// was also sent.
    Sent { emailed: bool },
}

// ---------------------------------------------------------------------------
// Notifier
// ---------------------------------------------------------------------------

/// Routes notifications according to each recipient's stored settings.
pub struct Notifier {
    pool: DbPool,
    email: Option<EmailDelivery>,
}

impl Notifier {
    /// Create a notifier. Pass `None` for `email` when SMTP is not
    /// configured; email opt-ins are then silently ignored.
    pub fn new(pool: DbPool, email: Option<EmailDelivery>) -> Self {
        Self { pool, email }
    }

    /// Route one notification.
    ///
    /// Email failures are logged and reported via `emailed: false` rather
    /// than propagated: a downstream SMTP outage must not fail the caller.
    pub async fn notify(&self, req: &NotifyRequest<'_>) -> Result<NotifyOutcome, sqlx::Error> {
        let settings = NotificationSettingsRepo::get(&self.pool, req.user_id).await?;

        // Per-kind opt-out; users without a settings row get everything.
        let kind_enabled = settings.as_ref().is_none_or(|s| match req.kind {
            "task_due_soon" | "task_due_today" => s.notify_due_soon,
            "task_overdue" => s.notify_overdue,
            KIND_PROJECT_STATUS => s.notify_project_status,
            KIND_PROPOSAL => s.notify_proposal,
            _ => true,
        });
        if !kind_enabled {
            return Ok(NotifyOutcome::Skipped);
        }

        let digest = settings.as_ref().is_some_and(|s| s.digest_enabled);
        let channel = if digest { CHANNEL_DIGEST } else { CHANNEL_IN_APP };

        NotificationRepo::create(
            &self.pool,
            &NewNotification {
                user_id: req.user_id,
                kind: req.kind,
                title: req.title,
                body: req.body,
                entity_type: req.entity_type,
                entity_id: req.entity_id,
                channel,
            },
        )
        .await?;

        if digest {
            return Ok(NotifyOutcome::Queued);
        }

        let wants_email = settings.as_ref().is_some_and(|s| s.email_enabled);
        let mut emailed = false;
        if wants_email {
            if let Some(mailer) = &self.email {
                emailed = self.send_email(mailer, req).await;
            }
        }

        Ok(NotifyOutcome::Sent { emailed })
    }

    /// Resolve the recipient's address and send an instant email.
    /// Returns `true` on success; all failures are logged and swallowed.
    async fn send_email(&self, mailer: &EmailDelivery, req: &NotifyRequest<'_>) -> bool {
        let user = match UserRepo::find_by_id(&self.pool, req.user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => return false,
            Err(e) => {
                tracing::error!(user_id = req.user_id, error = %e, "User lookup failed for email");
                return false;
            }
        };

        match mailer.deliver(&user.email, req.title, req.body).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    user_id = req.user_id,
                    kind = req.kind,
                    error = %e,
                    "Instant notification email failed"
                );
                false
            }
        }
    }
}
