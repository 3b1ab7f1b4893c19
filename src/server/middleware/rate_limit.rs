//! Per-API-route rate limiting middleware
//!
//! Applies the finer API limit on top of the edge limit enforced by the
//! access gateway. Non-API routes pass through untouched.

use crate::server::middleware::helpers::{client_key, is_api_route};
use crate::server::state::AppState;
use crate::utils::error::GatewayError;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error, ResponseError};
use futures::future::{ready, LocalBoxFuture, Ready};
use tracing::warn;

/// Middleware factory for API rate limiting
pub struct ApiRateLimit;

impl<S, B> Transform<S, ServiceRequest> for ApiRateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = ApiRateLimitMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiRateLimitMiddleware { service }))
    }
}

pub struct ApiRateLimitMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for ApiRateLimitMiddleware<S>
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
        if is_api_route(req.path()) {
            if let Some(state) = req.app_data::<web::Data<AppState>>() {
                let result = state.api_limiter.check_and_record(&client_key(&req));
                if !result.allowed {
                    warn!(
                        "API rate limit hit on {}: {}/{} requests",
                        req.path(),
                        result.current_count,
                        result.limit
                    );
                    let res = GatewayError::RateLimited {
                        retry_after_secs: result.retry_after_secs.unwrap_or(1),
                    }
                    .error_response();
                    return Box::pin(ready(Ok(req.into_response(res).map_into_right_body())));
                }
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            Ok(res.map_into_left_body())
        })
    }
}
