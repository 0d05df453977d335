//! Notification kind and priority constants.
//!
//! Stored as plain strings so new kinds can be introduced without a
//! migration; the wire contract uses these exact values.

/// A tracked artist announced a new concert.
pub const KIND_NEW_CONCERT: &str = "NEW_CONCERT";

/// Default notification priority.
pub const PRIORITY_NORMAL: &str = "normal";

/// Priority for time-sensitive notifications (new concert alerts).
pub const PRIORITY_HIGH: &str = "high";
