//! Orphanage profile service.

use chrono::Utc;
use mealbridge_common::{AppError, AppResult, IdGenerator};
use mealbridge_db::{
    entities::{
        orphanage,
        profile::{self, ProfileRole},
    },
    repositories::OrphanageRepository,
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Input for creating or updating an orphanage record.
///
/// `verified` is intentionally absent: that flag belongs to an external
/// administrative authority and is never accepted from a client.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertOrphanage {
    /// Institution name.
    #[validate(length(min = 1, max = 256))]
    pub name: String,
    /// Street address.
    #[validate(length(min = 1, max = 512))]
    pub address: String,
    /// Contact phone number.
    #[validate(length(min = 1, max = 64))]
    pub phone: String,
    /// Latitude in decimal degrees.
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    /// Longitude in decimal degrees.
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    /// How many children the institution can feed.
    #[validate(range(min = 1))]
    pub capacity: i32,
}

/// Orphanage service for business logic.
#[derive(Clone)]
pub struct OrphanageService {
    orphanage_repo: OrphanageRepository,
    id_gen: IdGenerator,
}

impl OrphanageService {
    /// Create a new orphanage service.
    #[must_use]
    pub const fn new(orphanage_repo: OrphanageRepository) -> Self {
        Self {
            orphanage_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Get the orphanage record owned by the actor, if any.
    pub async fn get_own(&self, actor: &profile::Model) -> AppResult<Option<orphanage::Model>> {
        self.orphanage_repo.find_by_user(&actor.id).await
    }

    /// Create or update the actor's orphanage record.
    ///
    /// Keyed on the owning account: one orphanage per orphanage-role
    /// profile. An update never touches `verified`.
    pub async fn upsert(
        &self,
        actor: &profile::Model,
        input: UpsertOrphanage,
    ) -> AppResult<orphanage::Model> {
        if actor.role != ProfileRole::Orphanage {
            return Err(AppError::Forbidden(
                "Only orphanage accounts can manage an orphanage profile".to_string(),
            ));
        }

        input.validate()?;

        let now = Utc::now().fixed_offset();

        if let Some(existing) = self.orphanage_repo.find_by_user(&actor.id).await? {
            let mut active: orphanage::ActiveModel = existing.into();
            active.name = Set(input.name);
            active.address = Set(input.address);
            active.phone = Set(input.phone);
            active.latitude = Set(input.latitude);
            active.longitude = Set(input.longitude);
            active.capacity = Set(input.capacity);
            active.updated_at = Set(now);

            let updated = self.orphanage_repo.update(active).await?;
            tracing::info!(orphanage_id = %updated.id, "Updated orphanage profile");
            return Ok(updated);
        }

        let model = orphanage::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(actor.id.clone()),
            name: Set(input.name),
            address: Set(input.address),
            phone: Set(input.phone),
            latitude: Set(input.latitude),
            longitude: Set(input.longitude),
            capacity: Set(input.capacity),
            verified: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = self.orphanage_repo.create(model).await?;
        tracing::info!(orphanage_id = %created.id, "Created orphanage profile");
        Ok(created)
    }

    /// List verified orphanages for the donor-facing directory.
    pub async fn list_verified(&self) -> AppResult<Vec<orphanage::Model>> {
        self.orphanage_repo.find_verified().await
    }
}
