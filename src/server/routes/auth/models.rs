//! Request and response models for the auth endpoints

use crate::auth::Role;
use crate::core::models::Identity;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body for POST /api/auth/signup
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub password: String,
}

/// Body for POST /api/auth/signin
#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// Body for POST /api/auth/federated
///
/// Stands in for the provider callback: the deployment terminates the
/// provider handshake upstream and posts the verified profile here.
#[derive(Debug, Deserialize)]
pub struct FederatedSigninRequest {
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Account fields safe to return to the caller
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub role: Role,
    pub email_verified: bool,
}

impl From<&Identity> for UserInfo {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id,
            email: identity.email.clone(),
            display_name: identity.display_name.clone(),
            avatar_url: identity.avatar_url.clone(),
            role: identity.role,
            email_verified: identity.email_verified_at.is_some(),
        }
    }
}

/// Successful sign-up / sign-in response
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub token_type: &'static str,
    /// Seconds until the token expires
    pub expires_in: u64,
    pub user: UserInfo,
}

impl AuthResponse {
    pub fn new(identity: &Identity, token: String, expires_in: u64) -> Self {
        Self {
            token,
            token_type: "Bearer",
            expires_in,
            user: UserInfo::from(identity),
        }
    }
}
