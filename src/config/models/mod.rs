//! Configuration model structs

pub mod auth;
pub mod rate_limit;
pub mod server;

pub use auth::{AuthConfig, PasswordPolicyConfig};
pub use rate_limit::{RateLimitConfig, RateLimitRule, RateLimitStrategy};
pub use server::ServerConfig;
