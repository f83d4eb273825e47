//! Request DTOs
//!
//! Data structures for API request bodies and query strings.

use serde::Deserialize;
use validator::Validate;

use crate::config::PaginationSettings;
use crate::shared::validation::{trimmed, trimmed_opt};
use crate::domain::{
    parse_optional, GunChanges, GunFilter, GunListQuery, GunSortField, ListQueryError, NewGun,
    Pagination, SortOrder,
};

/// Registration request
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Refresh token request, also used for logout
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Create gun request. PUT uses the same body.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateGunRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 100, message = "Manufacturer must be 1-100 characters"))]
    pub manufacturer: String,

    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,

    #[validate(range(min = 0, message = "Damage must not be negative"))]
    pub damage: i32,
}

impl From<CreateGunRequest> for NewGun {
    fn from(req: CreateGunRequest) -> Self {
        Self {
            name: req.name,
            manufacturer: req.manufacturer,
            price: req.price,
            damage: req.damage,
        }
    }
}

/// Partial gun update (PATCH)
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateGunRequest {
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(length(min = 1, max = 100, message = "Manufacturer must be 1-100 characters"))]
    pub manufacturer: Option<String>,

    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: Option<f64>,

    #[validate(range(min = 0, message = "Damage must not be negative"))]
    pub damage: Option<i32>,
}

impl From<UpdateGunRequest> for GunChanges {
    fn from(req: UpdateGunRequest) -> Self {
        Self {
            name: req.name,
            manufacturer: req.manufacturer,
            price: req.price,
            damage: req.damage,
        }
    }
}

/// Query string for `GET /guns`.
///
/// Everything arrives as text so that paging can stay lenient while numeric
/// filters report which parameter was malformed.
#[derive(Debug, Default, Deserialize)]
pub struct ListGunsParams {
    pub page: Option<String>,
    #[serde(rename = "pageSize", alias = "limit")]
    pub page_size: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub name: Option<String>,
    pub manufacturer: Option<String>,
    #[serde(rename = "minPrice")]
    pub min_price: Option<String>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<String>,
    #[serde(rename = "minDamage")]
    pub min_damage: Option<String>,
    #[serde(rename = "maxDamage")]
    pub max_damage: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl ListGunsParams {
    pub fn into_query(self, paging: &PaginationSettings) -> Result<GunListQuery, ListQueryError> {
        let sort = match non_blank(self.sort) {
            Some(raw) => raw.parse::<GunSortField>()?,
            None => GunSortField::default(),
        };

        let filter = GunFilter {
            name: non_blank(self.name),
            manufacturer: non_blank(self.manufacturer),
            min_price: parse_optional("minPrice", self.min_price.as_deref())?,
            max_price: parse_optional("maxPrice", self.max_price.as_deref())?,
            min_damage: parse_optional("minDamage", self.min_damage.as_deref())?,
            max_damage: parse_optional("maxDamage", self.max_damage.as_deref())?,
        };

        Ok(GunListQuery {
            filter,
            sort,
            order: SortOrder::parse_or_default(self.order.as_deref()),
            pagination: Pagination::from_raw(
                self.page.as_deref(),
                self.page_size.as_deref(),
                paging.default_page_size,
                paging.max_page_size,
            ),
        })
    }
}
