//! Gun entity and repository trait.
//!
//! Maps to the `guns` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{GunListQuery, Page};
use crate::shared::error::AppError;

/// A gun in the store's inventory.
///
/// Maps to the `guns` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - name: VARCHAR(100) NOT NULL
/// - manufacturer: VARCHAR(100) NOT NULL
/// - price: DOUBLE PRECISION NOT NULL CHECK (price >= 0)
/// - damage: INTEGER NOT NULL CHECK (damage >= 0)
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gun {
    pub id: i64,
    pub name: String,
    pub manufacturer: String,
    pub price: f64,
    /// Damage rating
    pub damage: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to stock a new gun.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGun {
    pub name: String,
    pub manufacturer: String,
    pub price: f64,
    pub damage: i32,
}

/// A partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GunChanges {
    pub name: Option<String>,
    pub manufacturer: Option<String>,
    pub price: Option<f64>,
    pub damage: Option<i32>,
}

impl GunChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.manufacturer.is_none()
            && self.price.is_none()
            && self.damage.is_none()
    }
}

impl From<NewGun> for GunChanges {
    fn from(gun: NewGun) -> Self {
        Self {
            name: Some(gun.name),
            manufacturer: Some(gun.manufacturer),
            price: Some(gun.price),
            damage: Some(gun.damage),
        }
    }
}

/// Repository trait for gun inventory persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GunRepository: Send + Sync {
    /// Fetch one page of guns matching the query, with the filtered total.
    async fn list(&self, query: &GunListQuery) -> Result<Page<Gun>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Gun>, AppError>;

    async fn create(&self, gun: &NewGun) -> Result<Gun, AppError>;

    /// Apply changes to a gun. Returns `None` if no gun has this id.
    async fn update(&self, id: i64, changes: &GunChanges) -> Result<Option<Gun>, AppError>;

    /// Delete a gun. Returns `false` if no gun has this id.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
