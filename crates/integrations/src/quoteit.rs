//! QuoteIT quote webhook payloads and status mapping.

use projectit_core::status::ProposalStatus;
use serde::Deserialize;

use crate::dispatch::KnownEvent;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Quote events we process from QuoteIT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteEvent {
    /// Quote was sent to the customer.
    Sent,
    /// Customer accepted the quote.
    Accepted,
    /// Customer declined the quote.
    Declined,
}

impl KnownEvent for QuoteEvent {
    fn parse(event_type: &str) -> Option<Self> {
        match event_type {
            "quote.sent" => Some(QuoteEvent::Sent),
            "quote.accepted" => Some(QuoteEvent::Accepted),
            "quote.declined" => Some(QuoteEvent::Declined),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// Body of a QuoteIT quote webhook delivery.
#[derive(Debug, Clone, Deserialize)]
pub struct QuotePayload {
    pub event_type: String,
    /// QuoteIT's quote id, matched against `proposals.external_quote_id`.
    pub quote_id: String,
    /// QuoteIT status string, mapped via [`map_quote_status`].
    pub status: Option<String>,
    /// Quote total in cents; reconciled onto the proposal amount.
    pub total_cents: Option<i64>,
    /// Quote title; reconciled onto the proposal title.
    pub title: Option<String>,
}

// ---------------------------------------------------------------------------
// Status mapping
// ---------------------------------------------------------------------------

/// Static mapping from QuoteIT status strings to local proposal status.
///
/// Unmapped strings are silently ignored, matching the ticket-status policy.
const QUOTE_STATUS_MAP: &[(&str, ProposalStatus)] = &[
    ("draft", ProposalStatus::Draft),
    ("sent", ProposalStatus::Sent),
    ("viewed", ProposalStatus::Viewed),
    ("accepted", ProposalStatus::Signed),
    ("declined", ProposalStatus::Declined),
];

/// Map an external quote status string, if it is one we recognize.
pub fn map_quote_status(status: &str) -> Option<ProposalStatus> {
    QUOTE_STATUS_MAP
        .iter()
        .find(|(s, _)| *s == status)
        .map(|(_, mapped)| *mapped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{route, Routed};

    #[test]
    fn known_quote_events_parse() {
        assert_eq!(
            route::<QuoteEvent>("quote.accepted"),
            Routed::Known(QuoteEvent::Accepted)
        );
    }

    #[test]
    fn unknown_quote_events_are_not_dispatched() {
        assert_eq!(route::<QuoteEvent>("quote.expired"), Routed::Unknown);
    }

    #[test]
    fn accepted_maps_to_signed() {
        assert_eq!(map_quote_status("accepted"), Some(ProposalStatus::Signed));
    }

    #[test]
    fn unmapped_statuses_are_silently_ignored() {
        assert_eq!(map_quote_status("archived"), None);
        assert_eq!(map_quote_status("ACCEPTED"), None);
    }
}
