//! HTTP server, middleware, and routes

pub mod middleware;
pub mod routes;
pub mod state;

mod builder;
#[allow(clippy::module_inception)]
mod server;

pub use builder::run_server;
pub use server::GatewayServer;
pub use state::AppState;
