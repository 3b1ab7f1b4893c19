//! Authentication configuration

use serde::{Deserialize, Serialize};

/// Token lifetime default: 30 days
fn default_token_max_age() -> u64 {
    30 * 24 * 60 * 60
}

/// Sliding-refresh threshold default: 24 hours
fn default_token_refresh() -> u64 {
    24 * 60 * 60
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Signing secret for session tokens. Required; the process refuses to
    /// start without a sufficiently strong value.
    pub jwt_secret: String,
    /// Token max-age in seconds
    #[serde(default = "default_token_max_age")]
    pub token_max_age_secs: u64,
    /// Sliding-refresh threshold in seconds: a verified token older than
    /// this is replaced with a fresh one
    #[serde(default = "default_token_refresh")]
    pub token_refresh_secs: u64,
    /// Password policy
    #[serde(default)]
    pub password: PasswordPolicyConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_max_age_secs: default_token_max_age(),
            token_refresh_secs: default_token_refresh(),
            password: PasswordPolicyConfig::default(),
        }
    }
}

impl AuthConfig {
    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt_secret.is_empty() {
            return Err(
                "Signing secret is required (set EDUGATE_JWT_SECRET)".to_string(),
            );
        }
        if self.jwt_secret.len() < 32 {
            return Err(
                "Signing secret must be at least 32 characters long".to_string(),
            );
        }
        if self.jwt_secret == "your-secret-key" || self.jwt_secret == "change-me" {
            return Err(
                "Signing secret must not use a placeholder value".to_string(),
            );
        }
        if self.token_max_age_secs < 300 {
            return Err("Token max-age should be at least 5 minutes".to_string());
        }
        if self.token_refresh_secs >= self.token_max_age_secs {
            return Err(
                "Token refresh threshold must be shorter than the max-age".to_string(),
            );
        }
        self.password.validate()?;
        Ok(())
    }
}

/// Password policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordPolicyConfig {
    /// Minimum password length
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    /// Maximum password length, bounding the hashing cost
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    /// Require at least one non-alphanumeric character
    #[serde(default)]
    pub require_special: bool,
}

impl Default for PasswordPolicyConfig {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            max_length: default_max_length(),
            require_special: false,
        }
    }
}

impl PasswordPolicyConfig {
    /// Validate password policy configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.min_length == 0 {
            return Err("Password minimum length cannot be 0".to_string());
        }
        if self.max_length < self.min_length {
            return Err(
                "Password maximum length cannot be below the minimum".to_string(),
            );
        }
        Ok(())
    }
}

fn default_min_length() -> usize {
    8
}

fn default_max_length() -> usize {
    128
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_secret() -> AuthConfig {
        AuthConfig {
            jwt_secret: "a-test-secret-that-is-long-enough-to-pass".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_auth_config_defaults() {
        let config = config_with_secret();
        assert_eq!(config.token_max_age_secs, 2_592_000);
        assert_eq!(config.token_refresh_secs, 86_400);
        assert_eq!(config.password.min_length, 8);
        assert_eq!(config.password.max_length, 128);
        assert!(!config.password.require_special);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_secret_rejected() {
        let config = AuthConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_short_secret_rejected() {
        let config = AuthConfig {
            jwt_secret: "short".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_refresh_must_be_below_max_age() {
        let config = AuthConfig {
            token_refresh_secs: 2_592_000,
            ..config_with_secret()
        };
        assert!(config.validate().is_err());
    }
}
