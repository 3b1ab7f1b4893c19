//! Error handling for the gateway
//!
//! This module defines all error types used throughout the gateway and the
//! mapping from errors to HTTP responses.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Result type alias for the gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Wrong email/password combination. Deliberately carries no detail so
    /// the response is identical for unknown emails and wrong passwords.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Password failed the strength policy; the violations are safe to show
    #[error("Password does not meet the required policy")]
    WeakPassword(Vec<String>),

    /// Token signature verified but the expiry has passed
    #[error("Session token expired")]
    TokenExpired,

    /// Token missing, malformed, or carrying a bad signature
    #[error("Session token invalid")]
    TokenInvalid,

    /// Authenticated but the role is not in the route's allow-set
    #[error("Insufficient permissions")]
    InsufficientRole,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited {
        /// Seconds until the client may retry
        retry_after_secs: u64,
    },

    /// Federated identity provider failure; detail is logged, never shown
    #[error("Upstream identity error: {0}")]
    UpstreamIdentity(String),

    /// Resource conflict (e.g. email already registered)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Request validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Cryptographic errors (malformed digests, signing failures)
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Credential store errors
    #[error("Credential store error: {0}")]
    Store(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidCredentials
            | GatewayError::TokenExpired
            | GatewayError::TokenInvalid
            | GatewayError::UpstreamIdentity(_) => StatusCode::UNAUTHORIZED,
            GatewayError::InsufficientRole => StatusCode::FORBIDDEN,
            GatewayError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            GatewayError::WeakPassword(_) | GatewayError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::Conflict(_) => StatusCode::CONFLICT,
            GatewayError::Crypto(_)
            | GatewayError::Config(_)
            | GatewayError::Store(_)
            | GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            GatewayError::InvalidCredentials => HttpResponse::Unauthorized()
                .json(json!({ "error": "Invalid credentials" })),
            // Expired and invalid tokens collapse to one unauthenticated
            // outcome at the boundary; they stay distinct for logging.
            GatewayError::TokenExpired | GatewayError::TokenInvalid => {
                HttpResponse::Unauthorized()
                    .json(json!({ "error": "Authentication required" }))
            }
            GatewayError::UpstreamIdentity(detail) => {
                error!("Federated sign-in failed: {}", detail);
                HttpResponse::Unauthorized().json(json!({ "error": "Sign-in failed" }))
            }
            GatewayError::InsufficientRole => HttpResponse::Forbidden()
                .json(json!({ "error": "Insufficient permissions" })),
            GatewayError::RateLimited { retry_after_secs } => {
                HttpResponse::TooManyRequests()
                    .insert_header(("retry-after", retry_after_secs.to_string()))
                    .json(json!({ "error": "Rate limit exceeded" }))
            }
            GatewayError::WeakPassword(violations) => HttpResponse::BadRequest().json(json!({
                "error": "Password does not meet the required policy",
                "violations": violations,
            })),
            GatewayError::Validation(message) => {
                HttpResponse::BadRequest().json(json!({ "error": message }))
            }
            GatewayError::Conflict(message) => {
                HttpResponse::Conflict().json(json!({ "error": message }))
            }
            // Unexpected failures: full detail server-side, nothing leaked
            GatewayError::Crypto(detail)
            | GatewayError::Config(detail)
            | GatewayError::Store(detail)
            | GatewayError::Internal(detail) => {
                error!("Internal error: {}", detail);
                HttpResponse::InternalServerError()
                    .json(json!({ "error": "Internal server error" }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            GatewayError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            GatewayError::TokenExpired.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            GatewayError::InsufficientRole.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            GatewayError::RateLimited { retry_after_secs: 1 }.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            GatewayError::WeakPassword(vec![]).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::Store("down".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_expired_and_invalid_share_a_status() {
        let expired = GatewayError::TokenExpired.error_response();
        let invalid = GatewayError::TokenInvalid.error_response();
        assert_eq!(expired.status(), invalid.status());
    }

    #[test]
    fn test_rate_limited_carries_retry_after() {
        let res = GatewayError::RateLimited { retry_after_secs: 42 }.error_response();
        assert_eq!(res.headers().get("retry-after").unwrap(), "42");
    }
}
