//! Orphanage repository.

use std::sync::Arc;

use crate::entities::{Orphanage, orphanage};
use mealbridge_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

/// Orphanage repository for database operations.
#[derive(Clone)]
pub struct OrphanageRepository {
    db: Arc<DatabaseConnection>,
}

impl OrphanageRepository {
    /// Create a new orphanage repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an orphanage by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<orphanage::Model>> {
        Orphanage::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find the orphanage owned by an account, if any.
    pub async fn find_by_user(&self, user_id: &str) -> AppResult<Option<orphanage::Model>> {
        Orphanage::find()
            .filter(orphanage::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new orphanage record.
    pub async fn create(&self, model: orphanage::ActiveModel) -> AppResult<orphanage::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update an orphanage record.
    pub async fn update(&self, model: orphanage::ActiveModel) -> AppResult<orphanage::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List verified orphanages (newest first).
    ///
    /// The `verified` flag is managed by an external authority; this layer
    /// only reads it.
    pub async fn find_verified(&self) -> AppResult<Vec<orphanage::Model>> {
        Orphanage::find()
            .filter(orphanage::Column::Verified.eq(true))
            .order_by_desc(orphanage::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
