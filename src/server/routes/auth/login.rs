//! Password sign-in endpoint

use super::models::{AuthResponse, SigninRequest};
use super::session_cookie;
use crate::server::state::AppState;
use crate::utils::error::Result;
use actix_web::{web, HttpResponse};
use tracing::info;

/// POST /api/auth/signin
///
/// Email format is not validated here: an address that never parses cannot
/// belong to an account, and the sign-in path answers every miss the same
/// way.
pub async fn signin(
    state: web::Data<AppState>,
    body: web::Json<SigninRequest>,
) -> Result<HttpResponse> {
    let body = body.into_inner();

    let (identity, token) = state.auth.sign_in(&body.email, &body.password).await?;
    info!("Sign-in for {}", identity.email);

    let expires_in = state.auth.tokens().max_age_secs();
    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&token))
        .json(AuthResponse::new(&identity, token, expires_in)))
}
