//! Session token issuance and verification
//!
//! Tokens are stateless HS256-signed claim sets; validity is proven by
//! signature and expiry, never by a lookup. Identity and role claims are
//! trusted from the token alone, so a role change only takes effect once the
//! token expires or is refreshed — an accepted staleness window.

use crate::auth::rbac::Role;
use crate::config::AuthConfig;
use crate::core::models::Identity;
use crate::utils::error::{GatewayError, Result};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};
use uuid::Uuid;

const ISSUER: &str = "edugate";

/// Signed session claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (identity id)
    pub sub: Uuid,
    /// Email address
    pub email: String,
    /// Role at issuance time
    pub role: Role,
    /// Issued-at timestamp (unix seconds)
    pub iat: u64,
    /// Expiry timestamp (unix seconds)
    pub exp: u64,
    /// Issuer
    pub iss: String,
}

/// Issues and verifies session tokens
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    max_age_secs: u64,
    refresh_secs: u64,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &self.algorithm)
            .field("max_age_secs", &self.max_age_secs)
            .field("refresh_secs", &self.refresh_secs)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

impl TokenService {
    /// Create a token service from configuration
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            max_age_secs: config.token_max_age_secs,
            refresh_secs: config.token_refresh_secs,
        }
    }

    /// Token lifetime in seconds
    pub fn max_age_secs(&self) -> u64 {
        self.max_age_secs
    }

    /// Issue a token for an identity, stamped with the current time
    pub fn issue(&self, identity: &Identity) -> Result<String> {
        self.issue_at(identity, unix_now()?)
    }

    /// Issue a token with an explicit issued-at timestamp
    pub fn issue_at(&self, identity: &Identity, now: u64) -> Result<String> {
        let claims = SessionClaims {
            sub: identity.id,
            email: identity.email.clone(),
            role: identity.role,
            iat: now,
            exp: now + self.max_age_secs,
            iss: ISSUER.to_string(),
        };
        self.sign(&claims)
    }

    /// Re-issue a replacement token carrying the same identity claims with a
    /// refreshed issued-at/expiry
    pub fn reissue(&self, claims: &SessionClaims, now: u64) -> Result<String> {
        let renewed = SessionClaims {
            sub: claims.sub,
            email: claims.email.clone(),
            role: claims.role,
            iat: now,
            exp: now + self.max_age_secs,
            iss: ISSUER.to_string(),
        };
        self.sign(&renewed)
    }

    /// Verify a token against the current time
    pub fn verify(&self, token: &str) -> Result<SessionClaims> {
        self.verify_at(token, unix_now()?)
    }

    /// Verify a token against an explicit timestamp
    ///
    /// Fails closed: a bad signature, malformed claims, or a passed expiry
    /// all reject. Expiry and tampering are internally distinct for logging
    /// but collapse to one unauthenticated outcome at the boundary.
    pub fn verify_at(&self, token: &str, now: u64) -> Result<SessionClaims> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[ISSUER]);
        // Expiry is checked manually against the injected clock
        validation.validate_exp = false;

        let data =
            decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                warn!("Token verification failed: {}", e);
                GatewayError::TokenInvalid
            })?;

        if data.claims.exp <= now {
            debug!("Expired token for subject {}", data.claims.sub);
            return Err(GatewayError::TokenExpired);
        }

        Ok(data.claims)
    }

    /// Whether a verified token is old enough for a sliding refresh
    pub fn needs_refresh(&self, claims: &SessionClaims, now: u64) -> bool {
        now.saturating_sub(claims.iat) > self.refresh_secs
    }

    fn sign(&self, claims: &SessionClaims) -> Result<String> {
        let header = Header::new(self.algorithm);
        encode(&header, claims, &self.encoding_key)
            .map_err(|e| GatewayError::Crypto(format!("Failed to sign token: {}", e)))
    }
}

/// Current unix time in seconds
pub fn unix_now() -> Result<u64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| GatewayError::Internal(format!("System time error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_service() -> TokenService {
        TokenService::new(&AuthConfig {
            jwt_secret: "a-test-secret-that-is-long-enough-to-pass".to_string(),
            ..Default::default()
        })
    }

    fn test_identity(role: Role) -> Identity {
        Identity {
            id: Uuid::new_v4(),
            email: "user@example.com".to_string(),
            display_name: None,
            avatar_url: None,
            role,
            password_hash: None,
            email_verified_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_issue_then_verify() {
        let service = test_service();
        let identity = test_identity(Role::Instructor);

        let token = service.issue(&identity).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.sub, identity.id);
        assert_eq!(claims.email, identity.email);
        assert_eq!(claims.role, Role::Instructor);
        assert_eq!(claims.exp, claims.iat + 30 * 24 * 60 * 60);
    }

    #[test]
    fn test_expired_after_max_age() {
        let service = test_service();
        let identity = test_identity(Role::Student);

        let issued_at = 1_700_000_000;
        let token = service.issue_at(&identity, issued_at).unwrap();

        // Still valid one second before expiry
        let just_before = issued_at + 30 * 24 * 60 * 60 - 1;
        assert!(service.verify_at(&token, just_before).is_ok());

        // Expired exactly at expiry and beyond
        let at_expiry = issued_at + 30 * 24 * 60 * 60;
        assert!(matches!(
            service.verify_at(&token, at_expiry),
            Err(GatewayError::TokenExpired)
        ));
    }

    #[test]
    fn test_tampered_token_invalid() {
        let service = test_service();
        let identity = test_identity(Role::Student);
        let token = service.issue(&identity).unwrap();

        // Flip a byte in the payload segment
        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        let mut payload = parts[1].clone().into_bytes();
        payload[0] = if payload[0] == b'A' { b'B' } else { b'A' };
        parts[1] = String::from_utf8(payload).unwrap();
        let tampered = parts.join(".");

        assert!(matches!(
            service.verify_at(&tampered, 0),
            Err(GatewayError::TokenInvalid)
        ));
    }

    #[test]
    fn test_garbage_token_invalid() {
        let service = test_service();
        assert!(matches!(
            service.verify_at("not.a.token", 0),
            Err(GatewayError::TokenInvalid)
        ));
    }

    #[test]
    fn test_wrong_secret_invalid() {
        let service = test_service();
        let other = TokenService::new(&AuthConfig {
            jwt_secret: "another-secret-that-is-also-long-enough".to_string(),
            ..Default::default()
        });

        let token = service.issue(&test_identity(Role::Admin)).unwrap();
        assert!(matches!(
            other.verify_at(&token, 0),
            Err(GatewayError::TokenInvalid)
        ));
    }

    #[test]
    fn test_needs_refresh_threshold() {
        let service = test_service();
        let identity = test_identity(Role::Student);
        let issued_at = 1_700_000_000;
        let token = service.issue_at(&identity, issued_at).unwrap();
        let claims = service.verify_at(&token, issued_at + 10).unwrap();

        assert!(!service.needs_refresh(&claims, issued_at + 86_400));
        assert!(service.needs_refresh(&claims, issued_at + 86_401));
    }

    #[test]
    fn test_reissue_extends_validity() {
        let service = test_service();
        let identity = test_identity(Role::Student);
        let issued_at = 1_700_000_000;
        let token = service.issue_at(&identity, issued_at).unwrap();
        let claims = service.verify_at(&token, issued_at + 1).unwrap();

        let later = issued_at + 2 * 86_400;
        let renewed = service.reissue(&claims, later).unwrap();
        let renewed_claims = service.verify_at(&renewed, later + 1).unwrap();

        assert_eq!(renewed_claims.sub, claims.sub);
        assert_eq!(renewed_claims.iat, later);
        assert!(renewed_claims.exp > claims.exp);
    }
}
