//! Core domain models shared across the gateway

use crate::auth::rbac::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user account record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// Unique identifier
    pub id: Uuid,
    /// Email address (case-normalized, unique)
    pub email: String,
    /// Display name
    pub display_name: Option<String>,
    /// Avatar image reference, when a federated provider supplied one
    pub avatar_url: Option<String>,
    /// Role
    pub role: Role,
    /// Password hash; federated-only accounts have none
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,
    /// When the email address was verified, if ever
    pub email_verified_at: Option<chrono::DateTime<chrono::Utc>>,
    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Identity {
    /// Whether this account can sign in with a password
    pub fn has_credentials(&self) -> bool {
        self.password_hash.is_some()
    }
}

/// Fields required to create a new identity
#[derive(Debug, Clone)]
pub struct NewIdentity {
    /// Email address; the store normalizes and enforces uniqueness
    pub email: String,
    /// Display name
    pub display_name: Option<String>,
    /// Avatar image reference
    pub avatar_url: Option<String>,
    /// Password hash, absent for federated-only accounts
    pub password_hash: Option<String>,
    /// Role
    pub role: Role,
    /// Pre-verified email timestamp (federated sign-ups)
    pub email_verified_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Normalize an email address for lookup and storage
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  User@Example.COM "), "user@example.com");
        assert_eq!(normalize_email("ok@example.com"), "ok@example.com");
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let identity = Identity {
            id: Uuid::new_v4(),
            email: "u@example.com".to_string(),
            display_name: None,
            avatar_url: None,
            role: Role::Student,
            password_hash: Some("$argon2id$secret".to_string()),
            email_verified_at: None,
            created_at: chrono::Utc::now(),
        };
        let json = serde_json::to_string(&identity).unwrap();
        assert!(!json.contains("argon2id"));
    }
}
