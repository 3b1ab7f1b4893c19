//! Rate limiting strategy implementations

use super::limiter::RateLimiter;
use super::types::{CounterEntry, RateLimitResult};
use std::time::Instant;
use tracing::debug;

impl RateLimiter {
    /// Fixed-window counting
    ///
    /// The counter resets when the window has fully elapsed. Up to twice the
    /// nominal rate can pass at a window boundary; that imprecision is the
    /// accepted trade-off for a two-field counter.
    pub(super) fn check_fixed_window(&self, key: &str) -> RateLimitResult {
        let now = Instant::now();
        let limit = self.max_requests;

        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| CounterEntry::new(now));
        let state = entry.value_mut();

        if now.duration_since(state.window_start) > self.window {
            state.count = 0;
            state.window_start = now;
        }

        let allowed = state.count < limit;
        if allowed {
            state.count += 1;
        }

        let elapsed = now.duration_since(state.window_start);
        let reset_after_secs = self.window.saturating_sub(elapsed).as_secs();
        let current_count = state.count;
        let remaining = limit.saturating_sub(current_count);

        if !allowed {
            debug!(
                "Rate limit exceeded for {}: {}/{} requests",
                key, current_count, limit
            );
        }

        RateLimitResult {
            allowed,
            current_count,
            limit,
            remaining,
            reset_after_secs,
            retry_after_secs: (!allowed).then(|| reset_after_secs.max(1)),
        }
    }

    /// Sliding-window counting over request timestamps
    ///
    /// Precise at window boundaries at the cost of one `Instant` per
    /// admitted request.
    pub(super) fn check_sliding_window(&self, key: &str) -> RateLimitResult {
        let now = Instant::now();
        let limit = self.max_requests;
        let window_start = now - self.window;

        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| CounterEntry::new(now));
        let state = entry.value_mut();

        state.timestamps.retain(|&t| t > window_start);

        let allowed = (state.timestamps.len() as u32) < limit;
        if allowed {
            state.timestamps.push(now);
        }

        let current_count = state.timestamps.len() as u32;
        let remaining = limit.saturating_sub(current_count);

        // Time until the oldest recorded request leaves the window
        let reset_after_secs = match state.timestamps.first() {
            Some(&oldest) => self
                .window
                .saturating_sub(now.duration_since(oldest))
                .as_secs(),
            None => 0,
        };

        if !allowed {
            debug!(
                "Rate limit exceeded for {}: {}/{} requests",
                key, current_count, limit
            );
        }

        RateLimitResult {
            allowed,
            current_count,
            limit,
            remaining,
            reset_after_secs,
            retry_after_secs: (!allowed).then(|| reset_after_secs.max(1)),
        }
    }
}
