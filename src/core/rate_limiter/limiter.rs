//! Core rate limiter implementation
//!
//! Counters are process-local and best-effort; a multi-instance deployment
//! needs a shared store behind the same contract.

use super::types::{CounterEntry, RateLimitResult};
use crate::config::{RateLimitRule, RateLimitStrategy};
use dashmap::DashMap;
use std::time::Duration;

/// Admission-control limiter tracking request counts per client key
///
/// The per-key entry lives behind a DashMap shard lock, so the
/// check-then-record step is atomic with respect to concurrent requests for
/// the same key.
pub struct RateLimiter {
    pub(super) max_requests: u32,
    pub(super) window: Duration,
    pub(super) strategy: RateLimitStrategy,
    pub(super) enabled: bool,
    pub(super) entries: DashMap<String, CounterEntry>,
}

impl RateLimiter {
    /// Create a limiter for a configured rule
    pub fn new(rule: &RateLimitRule, strategy: RateLimitStrategy, enabled: bool) -> Self {
        Self {
            max_requests: rule.max_requests,
            window: Duration::from_secs(rule.window_secs),
            strategy,
            enabled,
            entries: DashMap::new(),
        }
    }

    /// Atomically check and record a request for the given client key
    pub fn check_and_record(&self, key: &str) -> RateLimitResult {
        if !self.enabled {
            return RateLimitResult::bypass(self.max_requests);
        }

        match self.strategy {
            RateLimitStrategy::FixedWindow => self.check_fixed_window(key),
            RateLimitStrategy::SlidingWindow => self.check_sliding_window(key),
        }
    }

    /// Number of keys currently tracked
    pub fn tracked_keys(&self) -> usize {
        self.entries.len()
    }
}
