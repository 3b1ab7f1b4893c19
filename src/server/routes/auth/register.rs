//! Account sign-up endpoint

use super::models::{AuthResponse, SignupRequest};
use super::{session_cookie, validate_email};
use crate::server::state::AppState;
use crate::utils::error::Result;
use actix_web::{web, HttpResponse};
use tracing::info;

/// POST /api/auth/signup
pub async fn signup(
    state: web::Data<AppState>,
    body: web::Json<SignupRequest>,
) -> Result<HttpResponse> {
    let body = body.into_inner();
    validate_email(&body.email)?;

    let (identity, token) = state
        .auth
        .register(&body.email, body.display_name, &body.password)
        .await?;
    info!("Account created for {}", identity.email);

    let expires_in = state.auth.tokens().max_age_secs();
    Ok(HttpResponse::Created()
        .cookie(session_cookie(&token))
        .json(AuthResponse::new(&identity, token, expires_in)))
}
