//! Activity/audit trail constants and helpers.
//!
//! The activity log is append-only: entries are created as a side effect of
//! reconciliation and of notable API mutations, and are never updated or
//! deleted.

// ---------------------------------------------------------------------------
// Action type constants
// ---------------------------------------------------------------------------

/// Known action types for activity log entries.
pub mod actions {
    pub const STATUS_CHANGED: &str = "status_changed";
    pub const FIELDS_RECONCILED: &str = "fields_reconciled";
    pub const PROPOSAL_VIEWED: &str = "proposal_viewed";
    pub const PROPOSAL_SIGNED: &str = "proposal_signed";
    pub const PROPOSAL_DECLINED: &str = "proposal_declined";
    pub const ENTITY_CREATED: &str = "entity_created";
    pub const ENTITY_UPDATED: &str = "entity_updated";
    pub const ENTITY_DELETED: &str = "entity_deleted";
    pub const REMINDER_SENT: &str = "reminder_sent";
    pub const SETTINGS_CHANGED: &str = "settings_changed";
}

// ---------------------------------------------------------------------------
// Actor constants
// ---------------------------------------------------------------------------

/// Well-known non-human actors recorded in `activity_log.actor`.
pub mod actors {
    pub const HALOPSA_WEBHOOK: &str = "halopsa_webhook";
    pub const QUOTEIT_WEBHOOK: &str = "quoteit_webhook";
    pub const ESIGN_WEBHOOK: &str = "esign_webhook";
    pub const REMINDER_SWEEP: &str = "reminder_sweep";
    pub const ADMIN_API: &str = "admin_api";
}

// ---------------------------------------------------------------------------
// Action-to-category mapping
// ---------------------------------------------------------------------------

/// Log categories used for filtering the activity feed.
pub mod categories {
    pub const RECONCILIATION: &str = "reconciliation";
    pub const PROPOSALS: &str = "proposals";
    pub const OPERATIONS: &str = "operations";
    pub const CONFIGURATION: &str = "configuration";
}

/// Map an action type to its feed category.
///
/// Unknown action types default to `"operations"`.
pub fn action_to_category(action: &str) -> &'static str {
    match action {
        actions::STATUS_CHANGED | actions::FIELDS_RECONCILED => categories::RECONCILIATION,
        actions::PROPOSAL_VIEWED | actions::PROPOSAL_SIGNED | actions::PROPOSAL_DECLINED => {
            categories::PROPOSALS
        }
        actions::SETTINGS_CHANGED => categories::CONFIGURATION,
        _ => categories::OPERATIONS,
    }
}
