//! Authentication endpoints under /api/auth

pub mod federated;
pub mod login;
pub mod models;
pub mod register;
pub mod session;

use crate::server::middleware::helpers::SESSION_COOKIE;
use crate::utils::error::{GatewayError, Result};
use actix_web::cookie::{Cookie, SameSite};
use actix_web::web;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

/// Reject syntactically invalid email addresses before they reach the store
pub(crate) fn validate_email(email: &str) -> Result<()> {
    if EMAIL_RE.is_match(email.trim()) {
        Ok(())
    } else {
        Err(GatewayError::Validation("Invalid email address".to_string()))
    }
}

/// Session cookie mirroring the issued token, for browser navigations that
/// cannot attach a bearer header
pub(crate) fn session_cookie(token: &str) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

/// Register the auth endpoints
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .route("/signup", web::post().to(register::signup))
            .route("/signin", web::post().to(login::signin))
            .route("/federated", web::post().to(federated::federated_signin))
            .route("/session", web::get().to(session::session))
            .route("/signout", web::post().to(session::signout)),
    );
}
