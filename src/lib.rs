//! Authentication, session, and access-control gateway for an education
//! platform.
//!
//! The gateway fronts every request with one decision pipeline: rate limit,
//! token verification, route classification, role check. Accounts are
//! created with a policy-checked password or linked from a federated
//! identity provider; sessions are stateless signed tokens renewed on a
//! sliding schedule.

pub mod auth;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

pub use config::Config;
pub use utils::error::{GatewayError, Result};

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_crate_metadata() {
        assert_eq!(super::NAME, "edugate");
        assert!(!super::VERSION.is_empty());
    }
}
