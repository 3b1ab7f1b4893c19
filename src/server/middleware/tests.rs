use super::helpers::{classify_route, client_key, extract_token, is_api_route, RouteClass};
use crate::auth::Role;
use actix_web::test::TestRequest;

#[test]
fn test_public_routes() {
    for path in [
        "/",
        "/health",
        "/signin",
        "/signup",
        "/preview/lesson-1",
        "/api/auth/signin",
        "/api/auth/signup",
        "/api/auth/federated",
    ] {
        assert_eq!(classify_route(path), RouteClass::Public, "{}", path);
    }
}

#[test]
fn test_authenticated_routes() {
    for path in ["/dashboard", "/courses/42", "/api/auth/session", "/api/courses"] {
        assert_eq!(classify_route(path), RouteClass::Authenticated, "{}", path);
    }
}

#[test]
fn test_admin_routes() {
    for path in ["/admin", "/admin/users", "/api/admin/stats"] {
        match classify_route(path) {
            RouteClass::RoleRestricted(allowed) => {
                assert_eq!(allowed, &[Role::Admin], "{}", path);
            }
            other => panic!("{} classified as {:?}", path, other),
        }
    }
}

#[test]
fn test_api_route_detection() {
    assert!(is_api_route("/api/auth/session"));
    assert!(is_api_route("/api/admin/stats"));
    assert!(!is_api_route("/dashboard"));
    assert!(!is_api_route("/"));
}

#[test]
fn test_extract_token_from_bearer_header() {
    let req = TestRequest::default()
        .insert_header(("authorization", "Bearer tok-123"))
        .to_http_request();
    assert_eq!(extract_token(req.headers()).as_deref(), Some("tok-123"));
}

#[test]
fn test_extract_token_from_session_cookie() {
    let req = TestRequest::default()
        .insert_header(("cookie", "theme=dark; edugate_session=tok-456; lang=en"))
        .to_http_request();
    assert_eq!(extract_token(req.headers()).as_deref(), Some("tok-456"));
}

#[test]
fn test_bearer_header_wins_over_cookie() {
    let req = TestRequest::default()
        .insert_header(("authorization", "Bearer from-header"))
        .insert_header(("cookie", "edugate_session=from-cookie"))
        .to_http_request();
    assert_eq!(extract_token(req.headers()).as_deref(), Some("from-header"));
}

#[test]
fn test_extract_token_absent() {
    let req = TestRequest::default()
        .insert_header(("authorization", "Basic dXNlcjpwYXNz"))
        .to_http_request();
    assert_eq!(extract_token(req.headers()), None);
}

#[test]
fn test_client_key_prefers_forwarded_for() {
    let req = TestRequest::default()
        .insert_header(("x-forwarded-for", "203.0.113.9, 10.0.0.1"))
        .to_srv_request();
    assert_eq!(client_key(&req), "ip:203.0.113.9");
}

#[test]
fn test_client_key_falls_back_to_peer_addr() {
    let req = TestRequest::default()
        .peer_addr("198.51.100.4:9000".parse().unwrap())
        .to_srv_request();
    assert_eq!(client_key(&req), "ip:198.51.100.4");
}
