//! Rate limiting configuration

use serde::{Deserialize, Serialize};

/// A single limit: max requests per window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitRule {
    /// Maximum requests admitted per window
    pub max_requests: u32,
    /// Window duration in seconds
    pub window_secs: u64,
}

/// Rate limiting configuration
///
/// Two independent limits coexist: a coarse edge limit applied to all
/// traffic and a finer per-API-route limit applied additionally to API
/// prefixes. A request must pass both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Edge limit applied to all inbound traffic
    #[serde(default = "default_edge_rule")]
    pub edge: RateLimitRule,
    /// Per-API-route limit applied on top of the edge limit
    #[serde(default = "default_api_rule")]
    pub api: RateLimitRule,
    /// Counting strategy
    #[serde(default)]
    pub strategy: RateLimitStrategy,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            edge: default_edge_rule(),
            api: default_api_rule(),
            strategy: RateLimitStrategy::default(),
        }
    }
}

impl RateLimitConfig {
    /// Validate rate limiting configuration
    pub fn validate(&self) -> Result<(), String> {
        for (name, rule) in [("edge", &self.edge), ("api", &self.api)] {
            if rule.max_requests == 0 {
                return Err(format!("{} rate limit max_requests cannot be 0", name));
            }
            if rule.window_secs == 0 {
                return Err(format!("{} rate limit window cannot be 0", name));
            }
        }
        Ok(())
    }
}

/// Rate limiting strategy
///
/// Fixed-window counting admits up to twice the nominal rate at window
/// boundaries; the sliding window is the stronger substitute when precision
/// matters more than simplicity.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RateLimitStrategy {
    /// Fixed window: counter resets at fixed time boundaries
    #[default]
    FixedWindow,
    /// Sliding window over request timestamps
    SlidingWindow,
}

fn default_true() -> bool {
    true
}

fn default_edge_rule() -> RateLimitRule {
    RateLimitRule {
        max_requests: 100,
        window_secs: 15 * 60,
    }
}

fn default_api_rule() -> RateLimitRule {
    RateLimitRule {
        max_requests: 60,
        window_secs: 60,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_config_default() {
        let config = RateLimitConfig::default();
        assert!(config.enabled);
        assert_eq!(config.edge.max_requests, 100);
        assert_eq!(config.edge.window_secs, 900);
        assert_eq!(config.api.max_requests, 60);
        assert_eq!(config.api.window_secs, 60);
        assert_eq!(config.strategy, RateLimitStrategy::FixedWindow);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_window_rejected() {
        let config = RateLimitConfig {
            api: RateLimitRule {
                max_requests: 60,
                window_secs: 0,
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_strategy_serialization() {
        assert_eq!(
            serde_json::to_string(&RateLimitStrategy::FixedWindow).unwrap(),
            "\"fixed_window\""
        );
        assert_eq!(
            serde_json::to_string(&RateLimitStrategy::SlidingWindow).unwrap(),
            "\"sliding_window\""
        );
    }
}
