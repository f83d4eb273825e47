//! Data Transfer Objects
//!
//! DTOs for API request/response serialization.

pub mod request;
pub mod response;

pub use request::{
    CreateGunRequest, ListGunsParams, LoginRequest, RefreshTokenRequest, RegisterRequest,
    UpdateGunRequest,
};
pub use response::{
    AuthResponse, GunListResponse, GunResponse, LogoutAllResponse, TokenResponse, UserResponse,
};
