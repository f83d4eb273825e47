//! Middleware
//!
//! Tower middleware for request processing.

pub mod auth;
pub mod cors;
pub mod logging;
pub mod metrics;

pub use auth::{auth_middleware, AuthUser};
