//! Notification delivery infrastructure.
//!
//! - [`EmailConfig`] / [`EmailDelivery`] — async SMTP delivery via lettre.
//! - [`Notifier`] — preference-gated fan-out: per-kind opt-outs, digest
//!   queueing vs instant delivery, optional email.
//! - [`DigestScheduler`] — hourly background task that aggregates queued
//!   digest notifications into a single email per user.

pub mod delivery;
pub mod digest;
pub mod notify;

pub use delivery::email::{EmailConfig, EmailDelivery};
pub use digest::DigestScheduler;
pub use notify::{Notifier, NotifyRequest};
