//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **AuthService**: Registration, login, JWT tokens and refresh sessions
//! - **GunService**: Gun inventory listing and management

pub mod auth_service;
pub mod gun_service;

pub use auth_service::{AuthError, AuthService, AuthServiceImpl, AuthTokens, Claims};
pub use gun_service::{GunError, GunService, GunServiceImpl};
