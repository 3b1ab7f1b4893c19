//! Session inspection and sign-out endpoints

use super::models::UserInfo;
use crate::server::middleware::helpers::SESSION_COOKIE;
use crate::server::middleware::RequestIdentity;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_web::cookie::Cookie;
use actix_web::{web, HttpResponse};
use serde_json::json;

/// GET /api/auth/session
///
/// The gateway already verified the token; the store lookup refreshes the
/// display fields, which may be newer than the claims.
pub async fn session(
    state: web::Data<AppState>,
    identity: Option<web::ReqData<RequestIdentity>>,
) -> Result<HttpResponse> {
    let identity = identity.ok_or(GatewayError::TokenInvalid)?;

    match state.auth.store().find_by_id(identity.id).await? {
        Some(record) => Ok(HttpResponse::Ok().json(UserInfo::from(&record))),
        // Token outlived the account
        None => Err(GatewayError::TokenInvalid),
    }
}

/// POST /api/auth/signout
///
/// Stateless tokens cannot be revoked server-side; sign-out clears the
/// session cookie and the client discards its copy.
pub async fn signout() -> HttpResponse {
    let mut removal = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    removal.make_removal();

    HttpResponse::Ok()
        .cookie(removal)
        .json(json!({ "message": "Signed out" }))
}
