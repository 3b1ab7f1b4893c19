//! HTTP route handlers

pub mod auth;
pub mod health;

use actix_web::web;

/// Register all routes on the application
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check));
    auth::configure(cfg);
}
