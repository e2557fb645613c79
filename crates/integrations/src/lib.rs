//! Webhook reconciliation building blocks shared by every integration.
//!
//! Each inbound integration (HaloPSA tickets, QuoteIT quotes, e-signature
//! callbacks) is assembled from the same parts:
//!
//! - [`auth`] — pre-shared-secret request authentication.
//! - [`dispatch`] — event-type routing and the always-acknowledge response
//!   envelope.
//! - [`reconcile`] — sparse field diffing between external payloads and
//!   local records.
//! - [`halopsa`] / [`quoteit`] / [`esign`] — per-integration payload types
//!   and static status mapping tables.
//! - [`connection`] — admin-facing outbound connection tests.

pub mod auth;
pub mod connection;
pub mod dispatch;
pub mod esign;
pub mod halopsa;
pub mod quoteit;
pub mod reconcile;

pub use auth::{verify_shared_secret, WebhookAuthError};
pub use dispatch::{route, KnownEvent, Routed, WebhookAck};
pub use reconcile::Diff;
