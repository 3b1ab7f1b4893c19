//! Configuration management for the gateway
//!
//! Configuration is environment-driven: every knob has an `EDUGATE_`-prefixed
//! variable, and the process fails to start when the signing secret is
//! missing or weak.

pub mod models;

pub use models::*;

use crate::utils::error::{GatewayError, Result};
use std::env;
use tracing::debug;

/// Main configuration struct for the gateway
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// HTTP server settings
    pub server: ServerConfig,
    /// Authentication settings
    pub auth: AuthConfig,
    /// Rate limiting settings
    pub rate_limit: RateLimitConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(host) = read_var("EDUGATE_HOST") {
            config.server.host = host;
        }
        if let Some(port) = read_var("EDUGATE_PORT") {
            config.server.port = parse_var("EDUGATE_PORT", &port)?;
        }
        if let Some(path) = read_var("EDUGATE_SIGNIN_PATH") {
            config.server.signin_path = path;
        }
        if let Some(origins) = read_var("EDUGATE_CORS_ORIGINS") {
            config.server.cors_allowed_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        config.auth.jwt_secret = read_var("EDUGATE_JWT_SECRET").unwrap_or_default();
        if let Some(v) = read_var("EDUGATE_TOKEN_MAX_AGE_SECS") {
            config.auth.token_max_age_secs = parse_var("EDUGATE_TOKEN_MAX_AGE_SECS", &v)?;
        }
        if let Some(v) = read_var("EDUGATE_TOKEN_REFRESH_SECS") {
            config.auth.token_refresh_secs = parse_var("EDUGATE_TOKEN_REFRESH_SECS", &v)?;
        }
        if let Some(v) = read_var("EDUGATE_PASSWORD_MIN_LENGTH") {
            config.auth.password.min_length = parse_var("EDUGATE_PASSWORD_MIN_LENGTH", &v)?;
        }
        if let Some(v) = read_var("EDUGATE_REQUIRE_SPECIAL_CHAR") {
            config.auth.password.require_special =
                parse_var("EDUGATE_REQUIRE_SPECIAL_CHAR", &v)?;
        }

        if let Some(v) = read_var("EDUGATE_RATE_LIMIT_ENABLED") {
            config.rate_limit.enabled = parse_var("EDUGATE_RATE_LIMIT_ENABLED", &v)?;
        }
        if let Some(v) = read_var("EDUGATE_RATE_LIMIT_STRATEGY") {
            config.rate_limit.strategy = match v.as_str() {
                "fixed_window" => RateLimitStrategy::FixedWindow,
                "sliding_window" => RateLimitStrategy::SlidingWindow,
                other => {
                    return Err(GatewayError::Config(format!(
                        "Invalid value for EDUGATE_RATE_LIMIT_STRATEGY: {}",
                        other
                    )))
                }
            };
        }
        if let Some(v) = read_var("EDUGATE_EDGE_LIMIT") {
            config.rate_limit.edge.max_requests = parse_var("EDUGATE_EDGE_LIMIT", &v)?;
        }
        if let Some(v) = read_var("EDUGATE_EDGE_WINDOW_SECS") {
            config.rate_limit.edge.window_secs = parse_var("EDUGATE_EDGE_WINDOW_SECS", &v)?;
        }
        if let Some(v) = read_var("EDUGATE_API_LIMIT") {
            config.rate_limit.api.max_requests = parse_var("EDUGATE_API_LIMIT", &v)?;
        }
        if let Some(v) = read_var("EDUGATE_API_WINDOW_SECS") {
            config.rate_limit.api.window_secs = parse_var("EDUGATE_API_WINDOW_SECS", &v)?;
        }

        config.validate()?;
        debug!("Configuration loaded from environment");
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        self.server
            .validate()
            .map_err(|e| GatewayError::Config(format!("Server config error: {}", e)))?;
        self.auth
            .validate()
            .map_err(|e| GatewayError::Config(format!("Auth config error: {}", e)))?;
        self.rate_limit
            .validate()
            .map_err(|e| GatewayError::Config(format!("Rate limit config error: {}", e)))?;
        Ok(())
    }
}

fn read_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| GatewayError::Config(format!("Invalid value for {}: {}", name, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_secret() {
        let config = Config::default();
        assert!(matches!(
            config.validate(),
            Err(GatewayError::Config(_))
        ));
    }

    #[test]
    fn test_validate_with_secret() {
        let mut config = Config::default();
        config.auth.jwt_secret = "a-test-secret-that-is-long-enough-to-pass".to_string();
        assert!(config.validate().is_ok());
    }
}
