//! HTTP server configuration

use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Path browsers are redirected to when unauthenticated on a page route
    #[serde(default = "default_signin_path")]
    pub signin_path: String,
    /// CORS allowed origins; empty falls back to a permissive policy for
    /// development
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            signin_path: default_signin_path(),
            cors_allowed_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Validate server configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("Server host cannot be empty".to_string());
        }
        if self.port == 0 {
            return Err("Server port cannot be 0".to_string());
        }
        if !self.signin_path.starts_with('/') {
            return Err("Sign-in path must be absolute".to_string());
        }
        Ok(())
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_signin_path() -> String {
    "/signin".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.signin_path, "/signin");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_config_rejects_relative_signin_path() {
        let config = ServerConfig {
            signin_path: "signin".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
