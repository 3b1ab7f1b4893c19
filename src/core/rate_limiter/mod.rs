//! Request rate limiting
//!
//! Two limiter instances coexist in the gateway: a coarse edge limit over
//! all traffic and a finer per-API-route limit; a request must pass both.

mod limiter;
mod strategies;
mod types;

#[cfg(test)]
mod tests;

pub use limiter::RateLimiter;
pub use types::RateLimitResult;
