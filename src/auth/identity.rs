//! Federated identity linking
//!
//! Reconciles an upstream identity-provider assertion with a local account,
//! creating one when absent. The store's email uniqueness constraint is the
//! source of truth: a duplicate-creation race is resolved by re-fetching,
//! never surfaced as a failure.

use super::{AuthSystem, Role};
use crate::core::models::{normalize_email, Identity, NewIdentity};
use crate::storage::StoreError;
use crate::utils::error::{GatewayError, Result};
use tracing::{debug, info};

/// A verified profile asserted by an upstream identity provider
#[derive(Debug, Clone)]
pub struct FederatedProfile {
    /// Email the provider proved control of
    pub email: String,
    /// Display name, if the provider supplied one
    pub display_name: Option<String>,
    /// Avatar image reference, if the provider supplied one
    pub avatar_url: Option<String>,
}

impl FederatedProfile {
    /// Reject assertions that cannot identify an account
    fn validate(&self) -> Result<()> {
        if normalize_email(&self.email).is_empty() {
            return Err(GatewayError::UpstreamIdentity(
                "Provider assertion carried no email".to_string(),
            ));
        }
        Ok(())
    }
}

impl AuthSystem {
    /// Link a federated assertion to a local identity, creating one if absent
    ///
    /// An existing identity is returned unchanged: a federated sign-in never
    /// upgrades or downgrades the role. New identities start as students
    /// with no credential hash; the email counts as verified because the
    /// upstream provider already proved control of the address.
    pub async fn link_or_create(&self, profile: FederatedProfile) -> Result<Identity> {
        profile.validate()?;
        let email = normalize_email(&profile.email);

        if let Some(existing) = self.store().find_by_email(&email).await? {
            debug!("Federated sign-in linked to existing identity {}", existing.id);
            return Ok(existing);
        }

        let created = self
            .store()
            .create(NewIdentity {
                email: email.clone(),
                display_name: profile.display_name,
                avatar_url: profile.avatar_url,
                password_hash: None,
                role: Role::Student,
                email_verified_at: Some(chrono::Utc::now()),
            })
            .await;

        match created {
            Ok(identity) => {
                info!("Created identity {} from federated sign-in", identity.id);
                Ok(identity)
            }
            // Lost a creation race: someone else registered the email between
            // our lookup and create. Fetch and return theirs.
            Err(StoreError::DuplicateEmail) => self
                .store()
                .find_by_email(&email)
                .await?
                .ok_or_else(|| {
                    GatewayError::Store(
                        "Identity vanished after duplicate-create conflict".to_string(),
                    )
                }),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;
    use crate::storage::MemoryCredentialStore;
    use std::sync::Arc;

    fn test_system() -> AuthSystem {
        let config = AuthConfig {
            jwt_secret: "a-test-secret-that-is-long-enough-to-pass".to_string(),
            ..Default::default()
        };
        AuthSystem::new(&config, Arc::new(MemoryCredentialStore::new()))
    }

    fn profile(email: &str) -> FederatedProfile {
        FederatedProfile {
            email: email.to_string(),
            display_name: Some("Fed User".to_string()),
            avatar_url: Some("https://cdn.example.com/a.png".to_string()),
        }
    }

    #[tokio::test]
    async fn test_creates_student_with_verified_email() {
        let auth = test_system();
        let identity = auth.link_or_create(profile("Fed@Example.com")).await.unwrap();

        assert_eq!(identity.email, "fed@example.com");
        assert_eq!(identity.role, Role::Student);
        assert!(identity.password_hash.is_none());
        assert!(identity.email_verified_at.is_some());
    }

    #[tokio::test]
    async fn test_idempotent_for_same_email() {
        let auth = test_system();
        let first = auth.link_or_create(profile("one@example.com")).await.unwrap();
        let second = auth.link_or_create(profile("one@example.com")).await.unwrap();
        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_concurrent_linking_creates_one_identity() {
        let auth = test_system();
        let (a, b) = tokio::join!(
            auth.link_or_create(profile("race@example.com")),
            auth.link_or_create(profile("race@example.com")),
        );
        assert_eq!(a.unwrap().id, b.unwrap().id);
    }

    #[tokio::test]
    async fn test_existing_role_untouched() {
        let auth = test_system();
        // Promote the account out-of-band, then sign in federated again
        let identity = auth.link_or_create(profile("prof@example.com")).await.unwrap();
        assert_eq!(identity.role, Role::Student);

        let linked = auth.link_or_create(profile("prof@example.com")).await.unwrap();
        assert_eq!(linked.role, identity.role);
    }

    #[tokio::test]
    async fn test_empty_email_is_upstream_error() {
        let auth = test_system();
        let err = auth.link_or_create(profile("  ")).await.unwrap_err();
        assert!(matches!(err, GatewayError::UpstreamIdentity(_)));
    }
}
