//! HaloPSA ticket webhook payloads and status mapping.

use projectit_core::status::ProjectStatus;
use serde::Deserialize;

use crate::dispatch::KnownEvent;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Ticket events we process from HaloPSA.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketEvent {
    /// Ticket fields changed (summary, status, ...).
    Updated,
    /// Status-only change notification.
    StatusChanged,
    /// Ticket was closed; the linked project completes regardless of the
    /// reported status code.
    Closed,
}

impl KnownEvent for TicketEvent {
    fn parse(event_type: &str) -> Option<Self> {
        match event_type {
            "ticket.updated" => Some(TicketEvent::Updated),
            "ticket.status_changed" => Some(TicketEvent::StatusChanged),
            "ticket.closed" => Some(TicketEvent::Closed),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// Body of a HaloPSA ticket webhook delivery.
#[derive(Debug, Clone, Deserialize)]
pub struct TicketPayload {
    pub event_type: String,
    /// HaloPSA's ticket id, matched against `projects.halopsa_ticket_id`.
    pub ticket_id: String,
    /// HaloPSA numeric status code, mapped via [`map_ticket_status`].
    pub status: Option<i64>,
    /// Ticket summary; reconciled onto the project name.
    pub summary: Option<String>,
    /// Free-form ticket details; reconciled onto the project description.
    pub details: Option<String>,
}

// ---------------------------------------------------------------------------
// Status mapping
// ---------------------------------------------------------------------------

/// Static mapping from HaloPSA numeric status codes to local project status.
///
/// Codes absent from this table are silently ignored: no update, no error.
/// New upstream codes therefore require a code change (and redeploy) to take
/// effect.
const TICKET_STATUS_MAP: &[(i64, ProjectStatus)] = &[
    (1, ProjectStatus::Planning),     // New
    (2, ProjectStatus::InProgress),   // In Progress
    (4, ProjectStatus::OnHold),       // On Hold
    (5, ProjectStatus::OnHold),       // Awaiting Customer
    (8, ProjectStatus::Completed),    // Resolved
    (9, ProjectStatus::Completed),    // Closed
    (12, ProjectStatus::Cancelled),   // Cancelled
];

/// Map an external ticket status code, if it is one we recognize.
pub fn map_ticket_status(code: i64) -> Option<ProjectStatus> {
    TICKET_STATUS_MAP
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, s)| *s)
}
