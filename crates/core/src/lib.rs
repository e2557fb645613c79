//! Domain types and pure business logic shared across the ProjectIT backend.
//!
//! This crate has no internal dependencies so it can be used by the
//! repository layer, the integrations crate, and the API alike.

pub mod activity;
pub mod channels;
pub mod error;
pub mod pagination;
pub mod reminders;
pub mod status;
pub mod types;
