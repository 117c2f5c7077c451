//! Account profile service.

use chrono::Utc;
use mealbridge_common::AppResult;
use mealbridge_db::{entities::profile, repositories::ProfileRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Input for updating the contact fields of a profile.
///
/// Role and email are immutable here: the role is fixed at registration and
/// the email belongs to the external identity provider.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfile {
    /// Display name.
    #[validate(length(min = 1, max = 256))]
    pub full_name: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Contact address.
    pub address: Option<String>,
    /// Latitude in decimal degrees.
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees.
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

/// Profile service for business logic.
#[derive(Clone)]
pub struct ProfileService {
    profile_repo: ProfileRepository,
}

impl ProfileService {
    /// Create a new profile service.
    #[must_use]
    pub const fn new(profile_repo: ProfileRepository) -> Self {
        Self { profile_repo }
    }

    /// Get a profile by ID.
    pub async fn get(&self, id: &str) -> AppResult<profile::Model> {
        self.profile_repo.get_by_id(id).await
    }

    /// Update the actor's contact fields.
    pub async fn update(
        &self,
        actor: &profile::Model,
        input: UpdateProfile,
    ) -> AppResult<profile::Model> {
        input.validate()?;

        let mut active: profile::ActiveModel = actor.clone().into();
        if let Some(full_name) = input.full_name {
            active.full_name = Set(full_name);
        }
        if let Some(phone) = input.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(address) = input.address {
            active.address = Set(Some(address));
        }
        if let Some(latitude) = input.latitude {
            active.latitude = Set(Some(latitude));
        }
        if let Some(longitude) = input.longitude {
            active.longitude = Set(Some(longitude));
        }
        active.updated_at = Set(Utc::now().fixed_offset());

        self.profile_repo.update(active).await
    }
}
