//! Shared application state

use crate::auth::AuthSystem;
use crate::config::Config;
use crate::core::rate_limiter::RateLimiter;
use crate::storage::CredentialStore;
use std::sync::Arc;

/// State shared across workers and middleware
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth: AuthSystem,
    /// Coarse limit over all inbound traffic
    pub edge_limiter: Arc<RateLimiter>,
    /// Finer per-client limit applied to API routes
    pub api_limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn CredentialStore>) -> Self {
        let auth = AuthSystem::new(&config.auth, store);
        let edge_limiter = Arc::new(RateLimiter::new(
            &config.rate_limit.edge,
            config.rate_limit.strategy,
            config.rate_limit.enabled,
        ));
        let api_limiter = Arc::new(RateLimiter::new(
            &config.rate_limit.api,
            config.rate_limit.strategy,
            config.rate_limit.enabled,
        ));

        Self {
            config: Arc::new(config),
            auth,
            edge_limiter,
            api_limiter,
        }
    }
}
