//! Middleware for the gateway server
//!
//! Wrap order matters: [`SecurityHeaders`] outermost so headers land on
//! rejections too, then [`AccessGateway`], then [`ApiRateLimit`] innermost.

pub mod gateway;
pub mod helpers;
pub mod rate_limit;
pub mod security;

#[cfg(test)]
mod tests;

pub use gateway::{AccessGateway, RequestIdentity, RENEWED_TOKEN_HEADER};
pub use rate_limit::ApiRateLimit;
pub use security::SecurityHeaders;
