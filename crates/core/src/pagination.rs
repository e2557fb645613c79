//! Pagination defaults and clamping helpers.
//!
//! This module lives in `core` (zero internal deps) so it can be used by both
//! the API layer and any future CLI or worker tooling.

/// Default number of rows per page for list endpoints.
pub const DEFAULT_LIMIT: i64 = 50;

/// Maximum number of rows per page for list endpoints.
pub const MAX_LIMIT: i64 = 200;

/// Clamp a requested limit to `1..=max`, falling back to `default` when absent.
pub fn clamp_limit(requested: Option<i64>, default: i64, max: i64) -> i64 {
    requested.unwrap_or(default).clamp(1, max)
}

/// Clamp a requested offset to be non-negative, defaulting to 0.
pub fn clamp_offset(requested: Option<i64>) -> i64 {
    requested.unwrap_or(0).max(0)
}
