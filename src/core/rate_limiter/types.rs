//! Rate limiter types and data structures

use std::time::Instant;

/// Outcome of an admission check
#[derive(Debug, Clone)]
pub struct RateLimitResult {
    /// Whether the request is admitted
    pub allowed: bool,
    /// Request count in the current window, including this request when
    /// admitted
    pub current_count: u32,
    /// Maximum requests allowed per window
    pub limit: u32,
    /// Remaining requests in the window
    pub remaining: u32,
    /// Seconds until the window resets
    pub reset_after_secs: u64,
    /// Seconds until a retry could succeed; only set on rejection
    pub retry_after_secs: Option<u64>,
}

impl RateLimitResult {
    /// An all-clear result for disabled limiters
    pub(super) fn bypass(limit: u32) -> Self {
        Self {
            allowed: true,
            current_count: 0,
            limit,
            remaining: limit,
            reset_after_secs: 0,
            retry_after_secs: None,
        }
    }
}

/// Per-key counter state
#[derive(Debug)]
pub(super) struct CounterEntry {
    /// Count for the fixed window
    pub(super) count: u32,
    /// Start of the fixed window
    pub(super) window_start: Instant,
    /// Request timestamps for the sliding window
    pub(super) timestamps: Vec<Instant>,
}

impl CounterEntry {
    pub(super) fn new(now: Instant) -> Self {
        Self {
            count: 0,
            window_start: now,
            timestamps: Vec::new(),
        }
    }
}
