//! Gun Service
//!
//! Inventory use cases: listing, lookup and mutations.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::{Gun, GunChanges, GunListQuery, GunRepository, ListQueryError, NewGun, Page};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// Gun service trait
#[async_trait]
pub trait GunService: Send + Sync {
    /// Filtered, sorted page of guns
    async fn list_guns(&self, query: GunListQuery) -> Result<Page<Gun>, GunError>;

    async fn get_gun(&self, id: i64) -> Result<Gun, GunError>;

    async fn create_gun(&self, gun: NewGun) -> Result<Gun, GunError>;

    /// Overwrite every field of an existing gun
    async fn replace_gun(&self, id: i64, gun: NewGun) -> Result<Gun, GunError>;

    /// Apply a partial update
    async fn update_gun(&self, id: i64, changes: GunChanges) -> Result<Gun, GunError>;

    async fn delete_gun(&self, id: i64) -> Result<(), GunError>;
}

/// Gun service errors
#[derive(Debug, thiserror::Error)]
pub enum GunError {
    #[error("Gun not found")]
    NotFound,

    #[error("No fields to update")]
    EmptyUpdate,

    #[error(transparent)]
    InvalidQuery(#[from] ListQueryError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<GunError> for AppError {
    fn from(err: GunError) -> Self {
        match err {
            GunError::NotFound => AppError::NotFound("Gun not found".into()),
            GunError::EmptyUpdate => AppError::BadRequest("No fields to update".into()),
            GunError::InvalidQuery(e) => AppError::BadRequest(e.to_string()),
            GunError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<AppError> for GunError {
    fn from(err: AppError) -> Self {
        GunError::Internal(err.to_string())
    }
}

/// GunService implementation
pub struct GunServiceImpl<G>
where
    G: GunRepository,
{
    gun_repo: Arc<G>,
}

impl<G> GunServiceImpl<G>
where
    G: GunRepository,
{
    pub fn new(gun_repo: Arc<G>) -> Self {
        Self { gun_repo }
    }
}

#[async_trait]
impl<G> GunService for GunServiceImpl<G>
where
    G: GunRepository + 'static,
{
    async fn list_guns(&self, query: GunListQuery) -> Result<Page<Gun>, GunError> {
        query.filter.validate()?;

        debug!(
            sort = %query.sort,
            page = query.pagination.page,
            filtered = !query.filter.is_empty(),
            "Listing guns"
        );

        Ok(self.gun_repo.list(&query).await?)
    }

    async fn get_gun(&self, id: i64) -> Result<Gun, GunError> {
        self.gun_repo
            .find_by_id(id)
            .await?
            .ok_or(GunError::NotFound)
    }

    async fn create_gun(&self, gun: NewGun) -> Result<Gun, GunError> {
        let gun = self.gun_repo.create(&gun).await?;

        metrics::record_gun_mutation("create");
        info!(gun_id = gun.id, name = %gun.name, "Gun created");

        Ok(gun)
    }

    async fn replace_gun(&self, id: i64, gun: NewGun) -> Result<Gun, GunError> {
        let gun = self
            .gun_repo
            .update(id, &GunChanges::from(gun))
            .await?
            .ok_or(GunError::NotFound)?;

        metrics::record_gun_mutation("replace");
        info!(gun_id = id, "Gun replaced");

        Ok(gun)
    }

    async fn update_gun(&self, id: i64, changes: GunChanges) -> Result<Gun, GunError> {
        if changes.is_empty() {
            return Err(GunError::EmptyUpdate);
        }

        let gun = self
            .gun_repo
            .update(id, &changes)
            .await?
            .ok_or(GunError::NotFound)?;

        metrics::record_gun_mutation("update");
        info!(gun_id = id, "Gun updated");

        Ok(gun)
    }

    async fn delete_gun(&self, id: i64) -> Result<(), GunError> {
        if !self.gun_repo.delete(id).await? {
            return Err(GunError::NotFound);
        }

        metrics::record_gun_mutation("delete");
        info!(gun_id = id, "Gun deleted");

        Ok(())
    }
}
