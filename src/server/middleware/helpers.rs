//! Helper functions for middleware

use crate::auth::rbac::Role;
use actix_web::dev::ServiceRequest;
use actix_web::http::header::HeaderMap;

/// Cookie carrying the session token for browser navigations
pub const SESSION_COOKIE: &str = "edugate_session";

/// Access requirement for a request path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// No identity required
    Public,
    /// Any valid, non-expired token
    Authenticated,
    /// Valid token whose role belongs to the allow-set
    RoleRestricted(&'static [Role]),
}

/// Path prefixes reachable without a token: home, sign-in/sign-up pages and
/// their API endpoints, health, and the diagnostic preview pages
const PUBLIC_ROUTES: &[&str] = &[
    "/health",
    "/signin",
    "/signup",
    "/preview",
    "/api/auth/signin",
    "/api/auth/signup",
    "/api/auth/federated",
];

/// Prefixes requiring the admin role
const ADMIN_ROUTES: &[&str] = &["/admin", "/api/admin"];

const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// Classify a request path
///
/// Role restrictions are checked before the public list so an admin prefix
/// can never be shadowed by a broader public prefix.
pub fn classify_route(path: &str) -> RouteClass {
    if ADMIN_ROUTES.iter().any(|&route| path.starts_with(route)) {
        return RouteClass::RoleRestricted(ADMIN_ONLY);
    }
    if path == "/" || PUBLIC_ROUTES.iter().any(|&route| path.starts_with(route)) {
        return RouteClass::Public;
    }
    RouteClass::Authenticated
}

/// Whether a path is an API route (JSON errors) rather than a page route
/// (sign-in redirects)
pub fn is_api_route(path: &str) -> bool {
    path.starts_with("/api")
}

/// Extract the session token from a bearer header or session cookie
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(auth_header) = headers.get("authorization") {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(stripped) = auth_str.strip_prefix("Bearer ") {
                return Some(stripped.to_string());
            }
        }
    }

    if let Some(cookie_header) = headers.get("cookie") {
        if let Ok(cookie_str) = cookie_header.to_str() {
            for cookie in cookie_str.split(';') {
                if let Some(value) = cookie.trim().strip_prefix(SESSION_COOKIE) {
                    if let Some(token) = value.strip_prefix('=') {
                        return Some(token.to_string());
                    }
                }
            }
        }
    }

    None
}

/// Rate-limit key for a client: the first forwarded-for hop when present,
/// otherwise the peer address
pub fn client_key(req: &ServiceRequest) -> String {
    if let Some(forwarded) = req.headers().get("x-forwarded-for") {
        if let Ok(value) = forwarded.to_str() {
            if let Some(first) = value.split(',').next() {
                let first = first.trim();
                if !first.is_empty() {
                    return format!("ip:{}", first);
                }
            }
        }
    }

    req.peer_addr()
        .map(|addr| format!("ip:{}", addr.ip()))
        .unwrap_or_else(|| "ip:unknown".to_string())
}
