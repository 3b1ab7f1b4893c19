//! Core domain logic independent of the HTTP layer

pub mod models;
pub mod rate_limiter;
