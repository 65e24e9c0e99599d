//! Shared helpers for the admin facades

use chrono::{DateTime, Utc};

pub use crate::service::error::handle_errors;

/// Display format for service timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// List operations that accept a continuation token
pub const PAGEABLE_OPERATIONS: &[&str] = &[
    "list_accessors",
    "list_invitations",
    "list_members",
    "list_networks",
    "list_nodes",
    "list_proposal_votes",
    "list_proposals",
];

/// Check whether `operation` (snake_case) can be paginated
pub fn can_paginate(operation: &str) -> bool {
    PAGEABLE_OPERATIONS.contains(&operation)
}

/// Format a UTC timestamp as `YYYY-MM-DD HH:MM:SS`
pub fn format_datetime(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Format seconds since the Unix epoch as `YYYY-MM-DD HH:MM:SS` (UTC)
///
/// Out-of-range values come back empty.
pub fn format_timestamp(epoch_secs: i64) -> String {
    DateTime::from_timestamp(epoch_secs, 0)
        .map(|ts| format_datetime(&ts))
        .unwrap_or_default()
}
