//! Well-known notification channel name constants.
//!
//! These must match the channel values stored in the `notifications.channel`
//! column and referenced by the notifier and digest scheduler.

/// In-app notification stored for the notification bell UI.
pub const CHANNEL_IN_APP: &str = "in_app";

/// Digest notification queued for periodic batch delivery.
pub const CHANNEL_DIGEST: &str = "digest";
