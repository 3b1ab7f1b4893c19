//! HTTP server assembly

use crate::config::Config;
use crate::server::middleware::{AccessGateway, ApiRateLimit, SecurityHeaders};
use crate::server::routes;
use crate::server::state::AppState;
use crate::storage::memory::MemoryCredentialStore;
use crate::storage::CredentialStore;
use crate::utils::error::Result;
use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

/// The gateway server
pub struct GatewayServer {
    state: AppState,
}

impl GatewayServer {
    /// Create a server over the in-memory credential store
    pub fn new(config: Config) -> Result<Self> {
        Self::with_store(config, Arc::new(MemoryCredentialStore::new()))
    }

    /// Create a server over a custom credential store
    pub fn with_store(config: Config, store: Arc<dyn CredentialStore>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            state: AppState::new(config, store),
        })
    }

    /// Bind and run until shutdown
    pub async fn start(self) -> std::io::Result<()> {
        let host = self.state.config.server.host.clone();
        let port = self.state.config.server.port;
        let state = self.state;

        info!("Gateway listening on {}:{}", host, port);

        HttpServer::new(move || {
            // Later wraps are outermost: CORS must sit outside the gateway
            // so preflights never hit the access checks, and the security
            // headers go on every response including rejections.
            App::new()
                .app_data(web::Data::new(state.clone()))
                .wrap(ApiRateLimit)
                .wrap(AccessGateway)
                .wrap(build_cors(&state.config.server.cors_allowed_origins))
                .wrap(SecurityHeaders)
                .wrap(TracingLogger::default())
                .configure(routes::configure)
        })
        .bind((host.as_str(), port))?
        .run()
        .await
    }
}

fn build_cors(origins: &[String]) -> Cors {
    if origins.is_empty() {
        return Cors::permissive();
    }

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allow_any_header()
        .supports_credentials()
        .max_age(3600);
    for origin in origins {
        cors = cors.allowed_origin(origin);
    }
    cors
}
