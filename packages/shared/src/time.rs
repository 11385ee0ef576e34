//! Time-related utilities with clock abstraction for testability.
//!
//! Timestamps are Unix milliseconds. Rendering uses East Africa Time
//! (UTC+03:00), the local time of the chamas the server is built for.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};

/// Offset of East Africa Time from UTC, in seconds.
const EAT_OFFSET_SECS: i32 = 3 * 3600;

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp (milliseconds)
    fn now_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        now_millis()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    /// Create a new fixed clock with the given timestamp
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Get current Unix timestamp (milliseconds)
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert Unix timestamp (milliseconds) to EAT RFC 3339 format.
///
/// Out-of-range timestamps fall back to the Unix epoch.
pub fn timestamp_to_eat_rfc3339(timestamp_millis: i64) -> String {
    let eat_offset = FixedOffset::east_opt(EAT_OFFSET_SECS).unwrap(); // EAT is UTC+3
    let dt: DateTime<FixedOffset> = Utc
        .timestamp_millis_opt(timestamp_millis)
        .single()
        .unwrap_or_default()
        .with_timezone(&eat_offset);
    dt.to_rfc3339()
}
