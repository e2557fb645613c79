//! Event-type dispatch and the webhook acknowledgment envelope.
//!
//! Webhook handlers route on an exact-match `event_type` string over a small
//! fixed set of known events. Unrecognized types are logged and acknowledged
//! rather than rejected, so a misconfigured or newer upstream does not get
//! stuck in a retry storm. The cost is that dropped deliveries are invisible
//! unless separately monitored.

use serde::Serialize;

// ---------------------------------------------------------------------------
// KnownEvent / Routed
// ---------------------------------------------------------------------------

/// An integration's closed set of recognized event types.
pub trait KnownEvent: Sized {
    /// Exact-match parse of the `event_type` discriminator.
    fn parse(event_type: &str) -> Option<Self>;
}

/// Result of routing an `event_type` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routed<E> {
    /// Exactly one known event matched.
    Known(E),
    /// No known event matched; the delivery must still be acknowledged.
    Unknown,
}

/// Route an event-type string to an integration's event set.
pub fn route<E: KnownEvent>(event_type: &str) -> Routed<E> {
    match E::parse(event_type) {
        Some(event) => Routed::Known(event),
        None => Routed::Unknown,
    }
}

// ---------------------------------------------------------------------------
// WebhookAck
// ---------------------------------------------------------------------------

/// The `{ success, message? }` body every webhook endpoint returns.
///
/// `success` is `true` for every outcome except authentication failure;
/// internal errors are reported through `message` while the HTTP status stays
/// 200 so the sender does not retry.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WebhookAck {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl WebhookAck {
    /// Plain success with no message.
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    /// Success with an informational message (e.g. "no matching project").
    pub fn ok_with(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }

    /// Acknowledged-but-failed: HTTP 200 with the error in the body.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}
