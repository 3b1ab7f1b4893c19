//! Access-control gateway middleware
//!
//! Every request passes through one decision pipeline: edge rate limit,
//! token verification, route classification, then role check. A request that
//! clears the pipeline reaches its handler with a [`RequestIdentity`] in the
//! request extensions; a rejected request is answered here and never reaches
//! a handler.

use crate::auth::token::unix_now;
use crate::auth::Role;
use crate::server::middleware::helpers::{
    classify_route, client_key, extract_token, is_api_route, RouteClass,
};
use crate::server::state::AppState;
use crate::utils::error::GatewayError;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue, LOCATION};
use actix_web::{web, Error, HttpMessage, HttpResponse, ResponseError};
use futures::future::{ready, LocalBoxFuture, Ready};
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

/// Header carrying a renewed token when the sliding refresh fires
pub const RENEWED_TOKEN_HEADER: &str = "x-renewed-token";

/// Verified caller identity, inserted into request extensions for handlers
#[derive(Debug, Clone, Serialize)]
pub struct RequestIdentity {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

/// Middleware factory for the access gateway
pub struct AccessGateway;

impl<S, B> Transform<S, ServiceRequest> for AccessGateway
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AccessGatewayMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessGatewayMiddleware { service }))
    }
}

pub struct AccessGatewayMiddleware<S> {
    service: S,
}

enum Denial {
    Unauthenticated,
    Forbidden,
}

impl<S, B> Service<ServiceRequest> for AccessGatewayMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let state = match req.app_data::<web::Data<AppState>>().cloned() {
            Some(state) => state,
            None => {
                let res = GatewayError::Internal("gateway state missing".into()).error_response();
                return Box::pin(ready(Ok(terminal(req, res))));
            }
        };
        let path = req.path().to_string();

        // Edge limit first so abusive traffic never reaches the token checks
        let edge = state.edge_limiter.check_and_record(&client_key(&req));
        if !edge.allowed {
            warn!(
                "Edge rate limit hit on {}: {}/{} requests",
                path, edge.current_count, edge.limit
            );
            let res = GatewayError::RateLimited {
                retry_after_secs: edge.retry_after_secs.unwrap_or(1),
            }
            .error_response();
            return Box::pin(ready(Ok(terminal(req, res))));
        }

        // Resolve the caller identity regardless of route class; public
        // pages still personalize, and renewal applies everywhere.
        let claims = extract_token(req.headers()).and_then(|token| {
            match state.auth.tokens().verify(&token) {
                Ok(claims) => Some(claims),
                Err(err) => {
                    debug!("Rejecting presented token on {}: {}", path, err);
                    None
                }
            }
        });

        let decision = match (classify_route(&path), claims.as_ref()) {
            (RouteClass::Public, _) => Ok(()),
            (_, None) => Err(Denial::Unauthenticated),
            (RouteClass::Authenticated, Some(_)) => Ok(()),
            (RouteClass::RoleRestricted(allowed), Some(claims)) => {
                if claims.role.is_allowed(allowed) {
                    Ok(())
                } else {
                    Err(Denial::Forbidden)
                }
            }
        };

        match decision {
            Ok(()) => {}
            Err(Denial::Unauthenticated) => {
                let res = if is_api_route(&path) {
                    GatewayError::TokenInvalid.error_response()
                } else {
                    HttpResponse::Found()
                        .insert_header((LOCATION, state.config.server.signin_path.clone()))
                        .finish()
                };
                return Box::pin(ready(Ok(terminal(req, res))));
            }
            Err(Denial::Forbidden) => {
                if let Some(claims) = claims.as_ref() {
                    warn!(
                        "Denied {} to {} (role {})",
                        path, claims.email, claims.role
                    );
                }
                let res = GatewayError::InsufficientRole.error_response();
                return Box::pin(ready(Ok(terminal(req, res))));
            }
        }

        let mut renewed = None;
        if let Some(claims) = claims.as_ref() {
            req.extensions_mut().insert(RequestIdentity {
                id: claims.sub,
                email: claims.email.clone(),
                role: claims.role,
            });

            if let Ok(now) = unix_now() {
                if state.auth.tokens().needs_refresh(claims, now) {
                    match state.auth.tokens().reissue(claims, now) {
                        Ok(token) => renewed = Some(token),
                        Err(err) => warn!("Token renewal failed for {}: {}", claims.email, err),
                    }
                }
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let mut res = fut.await?.map_into_left_body();
            if let Some(token) = renewed {
                if let Ok(value) = HeaderValue::from_str(&token) {
                    res.headers_mut()
                        .insert(HeaderName::from_static(RENEWED_TOKEN_HEADER), value);
                }
            }
            Ok(res)
        })
    }
}

fn terminal<B>(req: ServiceRequest, res: HttpResponse) -> ServiceResponse<EitherBody<B>> {
    req.into_response(res).map_into_right_body()
}
