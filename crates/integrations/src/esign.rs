//! E-signature service webhook payloads.
//!
//! The signing service calls back with the proposal's public token rather
//! than any internal id, so the entity locator here is a token lookup.

use serde::Deserialize;
use uuid::Uuid;

use crate::dispatch::KnownEvent;

/// Proposal events delivered by the e-signature service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EsignEvent {
    /// Recipient opened the proposal.
    Viewed,
    /// Recipient signed.
    Signed,
    /// Recipient declined to sign.
    Declined,
}

impl KnownEvent for EsignEvent {
    fn parse(event_type: &str) -> Option<Self> {
        match event_type {
            "proposal.viewed" => Some(EsignEvent::Viewed),
            "proposal.signed" => Some(EsignEvent::Signed),
            "proposal.declined" => Some(EsignEvent::Declined),
            _ => None,
        }
    }
}

/// Body of an e-signature webhook delivery.
#[derive(Debug, Clone, Deserialize)]
pub struct EsignPayload {
    pub event_type: String,
    /// Echo of the `public_token` embedded in the signing link.
    pub public_token: Uuid,
    pub signer_name: Option<String>,
    pub signer_email: Option<String>,
}
