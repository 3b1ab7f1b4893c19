//! Password hashing and strength policy
//!
//! Hashing uses Argon2id with a fresh salt per call, so two hashes of the
//! same plaintext never match. The strength policy is a data-driven ordered
//! rule list; validation accumulates every failing rule instead of
//! short-circuiting, and never errors.

use crate::config::PasswordPolicyConfig;
use crate::utils::error::{GatewayError, Result};
use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use serde::Serialize;

/// Common passwords rejected outright (case-insensitive compare)
const DENY_LIST: &[&str] = &[
    "password",
    "password1",
    "12345678",
    "123456789",
    "qwertyuiop",
    "iloveyou",
    "letmein123",
    "welcome1",
    "admin123",
    "sunshine",
];

/// Hash a password using Argon2id with a fresh random salt
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| GatewayError::Crypto(format!("Failed to hash password: {}", e)))?;

    Ok(password_hash.to_string())
}

/// Verify a password against its hash
///
/// Returns `Ok(false)` only for a genuine mismatch. A digest that was not
/// produced by this hasher is a crypto error, never a silent `false`.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| GatewayError::Crypto(format!("Failed to parse password hash: {}", e)))?;

    let argon2 = Argon2::default();

    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(GatewayError::Crypto(format!(
            "Password verification failed: {}",
            e
        ))),
    }
}

/// A single named policy rule
struct PolicyRule {
    name: &'static str,
    message: String,
    check: Box<dyn Fn(&str) -> bool + Send + Sync>,
}

/// One failing rule, safe to show the user
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PolicyViolation {
    /// Stable rule identifier
    pub rule: String,
    /// Human-readable message
    pub message: String,
}

/// Result of a strength check
#[derive(Debug, Clone, Serialize)]
pub struct PolicyReport {
    /// Whether every rule passed
    pub valid: bool,
    /// All failing rules, in policy order
    pub violations: Vec<PolicyViolation>,
}

impl PolicyReport {
    /// Violation messages only, for error responses
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(|v| v.message.clone()).collect()
    }
}

/// Ordered, data-driven password strength policy
pub struct PasswordPolicy {
    rules: Vec<PolicyRule>,
}

impl PasswordPolicy {
    /// Build the rule list from configuration
    pub fn new(config: &PasswordPolicyConfig) -> Self {
        let min_length = config.min_length;
        let max_length = config.max_length;

        let mut rules: Vec<PolicyRule> = vec![
            PolicyRule {
                name: "min_length",
                message: format!("must be at least {} characters long", min_length),
                check: Box::new(move |pw| pw.chars().count() >= min_length),
            },
            PolicyRule {
                name: "max_length",
                message: format!("must be at most {} characters long", max_length),
                check: Box::new(move |pw| pw.chars().count() <= max_length),
            },
            PolicyRule {
                name: "uppercase",
                message: "must contain an uppercase letter".to_string(),
                check: Box::new(|pw| pw.chars().any(|c| c.is_ascii_uppercase())),
            },
            PolicyRule {
                name: "lowercase",
                message: "must contain a lowercase letter".to_string(),
                check: Box::new(|pw| pw.chars().any(|c| c.is_ascii_lowercase())),
            },
            PolicyRule {
                name: "digit",
                message: "must contain a digit".to_string(),
                check: Box::new(|pw| pw.chars().any(|c| c.is_ascii_digit())),
            },
        ];

        if config.require_special {
            rules.push(PolicyRule {
                name: "special",
                message: "must contain a special character".to_string(),
                check: Box::new(|pw| pw.chars().any(|c| !c.is_alphanumeric())),
            });
        }

        rules.push(PolicyRule {
            name: "common",
            message: "is too common".to_string(),
            check: Box::new(|pw| {
                let lowered = pw.to_lowercase();
                !DENY_LIST.contains(&lowered.as_str())
            }),
        });

        Self { rules }
    }

    /// Check a password against every rule, accumulating all violations
    pub fn validate(&self, password: &str) -> PolicyReport {
        let violations: Vec<PolicyViolation> = self
            .rules
            .iter()
            .filter(|rule| !(rule.check)(password))
            .map(|rule| PolicyViolation {
                rule: rule.name.to_string(),
                message: format!("Password {}", rule.message),
            })
            .collect();

        PolicyReport {
            valid: violations.is_empty(),
            violations,
        }
    }
}
