//! Federated sign-in endpoint

use super::models::{AuthResponse, FederatedSigninRequest};
use super::{session_cookie, validate_email};
use crate::auth::FederatedProfile;
use crate::server::state::AppState;
use crate::utils::error::Result;
use actix_web::{web, HttpResponse};
use tracing::info;

/// POST /api/auth/federated
///
/// Accepts a provider-verified profile and signs the caller in, creating a
/// local account on first contact.
pub async fn federated_signin(
    state: web::Data<AppState>,
    body: web::Json<FederatedSigninRequest>,
) -> Result<HttpResponse> {
    let body = body.into_inner();
    validate_email(&body.email)?;

    let identity = state
        .auth
        .link_or_create(FederatedProfile {
            email: body.email,
            display_name: body.display_name,
            avatar_url: body.avatar_url,
        })
        .await?;
    let token = state.auth.tokens().issue(&identity)?;
    info!("Federated sign-in for {}", identity.email);

    let expires_in = state.auth.tokens().max_age_secs();
    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&token))
        .json(AuthResponse::new(&identity, token, expires_in)))
}
