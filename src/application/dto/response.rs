//! Response DTOs
//!
//! Data structures for API response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::services::AuthTokens;
use crate::domain::{Gun, Page, User};

/// Register/login response (user plus tokens)
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserResponse,
    /// Access JWT
    pub token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub token_type: String,
}

impl AuthResponse {
    pub fn new(message: impl Into<String>, user: User, tokens: AuthTokens) -> Self {
        Self {
            message: message.into(),
            user: user.into(),
            token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_in: tokens.expires_in,
            token_type: tokens.token_type,
        }
    }
}

/// Refresh response
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub message: String,
    pub token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub token_type: String,
}

impl From<AuthTokens> for TokenResponse {
    fn from(tokens: AuthTokens) -> Self {
        Self {
            message: "Token refreshed".to_string(),
            token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_in: tokens.expires_in,
            token_type: tokens.token_type,
        }
    }
}

/// Logout-all response
#[derive(Debug, Serialize)]
pub struct LogoutAllResponse {
    pub message: String,
    pub revoked: u64,
}

/// User response
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Gun response
#[derive(Debug, Serialize)]
pub struct GunResponse {
    pub id: i64,
    pub name: String,
    pub manufacturer: String,
    pub price: f64,
    pub damage: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Gun> for GunResponse {
    fn from(gun: Gun) -> Self {
        Self {
            id: gun.id,
            name: gun.name,
            manufacturer: gun.manufacturer,
            price: gun.price,
            damage: gun.damage,
            created_at: gun.created_at,
            updated_at: gun.updated_at,
        }
    }
}

/// Paginated gun list
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GunListResponse {
    pub total_records: i64,
    pub total_pages: i64,
    pub page_size: u32,
    pub current_page: u32,
    pub data: Vec<GunResponse>,
}

impl From<Page<Gun>> for GunListResponse {
    fn from(page: Page<Gun>) -> Self {
        let total_pages = page.total_pages();
        let page = page.map(GunResponse::from);

        Self {
            total_records: page.total,
            total_pages,
            page_size: page.pagination.page_size,
            current_page: page.pagination.page,
            data: page.items,
        }
    }
}
