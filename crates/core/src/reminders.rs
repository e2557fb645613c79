//! Pure due-date reminder logic.
//!
//! The reminder sweep (API crate) loads tasks and per-user settings and asks
//! this module which tasks warrant a reminder. Keeping the window math here
//! makes it unit-testable without a database.

use chrono::NaiveDate;

/// Default look-ahead window when a user has no stored settings.
pub const DEFAULT_REMINDER_WINDOW_DAYS: i32 = 3;

// ---------------------------------------------------------------------------
// ReminderKind
// ---------------------------------------------------------------------------

/// Why a task is being surfaced to its assignee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderKind {
    /// The due date has already passed.
    Overdue,
    /// The due date is today.
    DueToday,
    /// The due date falls within the user's configured look-ahead window.
    DueSoon,
}

impl ReminderKind {
    /// Stable string form used for `notifications.kind` and opt-out checks.
    pub fn as_str(self) -> &'static str {
        match self {
            ReminderKind::Overdue => "task_overdue",
            ReminderKind::DueToday => "task_due_today",
            ReminderKind::DueSoon => "task_due_soon",
        }
    }
}

// ---------------------------------------------------------------------------
// Window math
// ---------------------------------------------------------------------------

/// Signed number of days from `today` until `due`. Negative means overdue.
pub fn days_until_due(today: NaiveDate, due: NaiveDate) -> i64 {
    (due - today).num_days()
}

/// Classify a task's due date against a user's look-ahead window.
///
/// Returns `None` when the due date is further out than `window_days`,
/// meaning no reminder should be produced. A non-positive window still
/// produces `DueToday` and `Overdue` reminders.
pub fn classify(today: NaiveDate, due: NaiveDate, window_days: i32) -> Option<ReminderKind> {
    let delta = days_until_due(today, due);
    if delta < 0 {
        Some(ReminderKind::Overdue)
    } else if delta == 0 {
        Some(ReminderKind::DueToday)
    } else if delta <= i64::from(window_days.max(0)) {
        Some(ReminderKind::DueSoon)
    } else {
        None
    }
}
