//! Authentication and authorization system
//!
//! [`AuthSystem`] composes the credential store, password policy, and token
//! service behind the sign-up and sign-in flows.

pub mod identity;
pub mod password;
pub mod rbac;
pub mod token;

pub use identity::FederatedProfile;
pub use rbac::Role;
pub use token::{SessionClaims, TokenService};

use crate::config::AuthConfig;
use crate::core::models::{normalize_email, Identity, NewIdentity};
use crate::storage::CredentialStore;
use crate::utils::error::{GatewayError, Result};
use once_cell::sync::Lazy;
use password::PasswordPolicy;
use std::sync::Arc;
use tracing::{info, warn};

/// A hash verified against when the email is unknown, so response timing
/// does not reveal whether an account exists.
static TIMING_PAD_HASH: Lazy<String> =
    Lazy::new(|| password::hash_password("edugate.timing.pad").unwrap_or_default());

/// Main authentication system
#[derive(Clone)]
pub struct AuthSystem {
    store: Arc<dyn CredentialStore>,
    tokens: Arc<TokenService>,
    policy: Arc<PasswordPolicy>,
}

impl AuthSystem {
    /// Create a new authentication system
    pub fn new(config: &AuthConfig, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            store,
            tokens: Arc::new(TokenService::new(config)),
            policy: Arc::new(PasswordPolicy::new(&config.password)),
        }
    }

    /// Token service
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Credential store
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Register a new account with email and password, returning the created
    /// identity and a session token
    pub async fn register(
        &self,
        email: &str,
        display_name: Option<String>,
        password: &str,
    ) -> Result<(Identity, String)> {
        let email = normalize_email(email);

        let report = self.policy.validate(password);
        if !report.valid {
            return Err(GatewayError::WeakPassword(report.messages()));
        }

        if self.store.find_by_email(&email).await?.is_some() {
            return Err(GatewayError::Conflict("Email already registered".into()));
        }

        // The KDF is deliberately slow; keep it off the request-handling pool
        let password_owned = password.to_string();
        let password_hash =
            tokio::task::spawn_blocking(move || password::hash_password(&password_owned))
                .await
                .map_err(|e| GatewayError::Internal(format!("Hashing task failed: {}", e)))??;

        let identity = self
            .store
            .create(NewIdentity {
                email: email.clone(),
                display_name,
                avatar_url: None,
                password_hash: Some(password_hash),
                role: Role::Student,
                email_verified_at: None,
            })
            .await?;

        info!("Registered new account {}", identity.id);
        let token = self.tokens.issue(&identity)?;
        Ok((identity, token))
    }

    /// Sign in with email and password
    ///
    /// Unknown email, missing credential material, and wrong password all
    /// produce the same [`GatewayError::InvalidCredentials`]; a pad
    /// verification runs on the miss paths to equalize timing.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(Identity, String)> {
        let email = normalize_email(email);
        let identity = self.store.find_by_email(&email).await?;

        let (identity, hash) = match identity {
            Some(identity) => match identity.password_hash.clone() {
                Some(hash) => (Some(identity), hash),
                None => (None, TIMING_PAD_HASH.clone()),
            },
            None => (None, TIMING_PAD_HASH.clone()),
        };

        let password_owned = password.to_string();
        let verified =
            tokio::task::spawn_blocking(move || password::verify_password(&password_owned, &hash))
                .await
                .map_err(|e| GatewayError::Internal(format!("Verification task failed: {}", e)))?;

        match (identity, verified) {
            (Some(identity), Ok(true)) => {
                info!("Sign-in for {}", identity.id);
                let token = self.tokens.issue(&identity)?;
                Ok((identity, token))
            }
            (Some(identity), Err(e)) => {
                // A digest this hasher cannot parse is a system fault, not a
                // wrong password
                warn!("Credential verification fault for {}: {}", identity.id, e);
                Err(e)
            }
            _ => Err(GatewayError::InvalidCredentials),
        }
    }
}
