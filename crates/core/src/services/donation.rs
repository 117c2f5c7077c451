//! Donation lifecycle service.
//!
//! Owns the state machine: pending → accepted | rejected, accepted →
//! completed, with completed and rejected terminal. Every transition is
//! authorized here regardless of what a client displays, and executed as a
//! conditional update so concurrent actors cannot both win the same
//! transition.

use chrono::Utc;
use mealbridge_common::{AppError, AppResult, IdGenerator};
use mealbridge_db::{
    entities::{
        donation::{self, DonationStatus},
        profile::{self, ProfileRole},
    },
    repositories::{DonationRepository, OrphanageRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

use crate::services::matching::{RankedDonation, rank_donations};
use crate::services::notification::NotificationService;

/// Input for creating a donation.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewDonation {
    /// What kind of food, e.g. "Rice" or "Cooked Meals".
    #[validate(length(min = 1, max = 256))]
    pub food_type: String,
    /// Free-text amount, e.g. "50 servings".
    #[validate(length(min = 1, max = 256))]
    pub quantity: String,
    /// When the food stops being safe to hand out.
    pub expiry_time: chrono::DateTime<chrono::FixedOffset>,
    /// Pickup address.
    #[validate(length(min = 1, max = 512))]
    pub location: String,
    /// Pickup latitude in decimal degrees.
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    /// Pickup longitude in decimal degrees.
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    /// Optional special instructions.
    pub notes: Option<String>,
}

/// Donation service for business logic.
#[derive(Clone)]
pub struct DonationService {
    donation_repo: DonationRepository,
    orphanage_repo: OrphanageRepository,
    notification_service: NotificationService,
    id_gen: IdGenerator,
}

impl DonationService {
    /// Create a new donation service.
    #[must_use]
    pub const fn new(
        donation_repo: DonationRepository,
        orphanage_repo: OrphanageRepository,
        notification_service: NotificationService,
    ) -> Self {
        Self {
            donation_repo,
            orphanage_repo,
            notification_service,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a donation in the `pending` state.
    ///
    /// Only donor-role accounts may post donations.
    pub async fn create(
        &self,
        actor: &profile::Model,
        input: NewDonation,
    ) -> AppResult<donation::Model> {
        if actor.role != ProfileRole::Donor {
            return Err(AppError::Forbidden(
                "Only donors can create donations".to_string(),
            ));
        }

        input.validate()?;

        let now = Utc::now().fixed_offset();
        let model = donation::ActiveModel {
            id: Set(self.id_gen.generate()),
            donor_id: Set(actor.id.clone()),
            food_type: Set(input.food_type),
            quantity: Set(input.quantity),
            expiry_time: Set(input.expiry_time),
            location: Set(input.location),
            latitude: Set(input.latitude),
            longitude: Set(input.longitude),
            notes: Set(input.notes.filter(|n| !n.is_empty())),
            status: Set(DonationStatus::Pending),
            accepted_by: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = self.donation_repo.create(model).await?;

        tracing::info!(
            donation_id = %created.id,
            donor_id = %created.donor_id,
            "Created donation"
        );

        Ok(created)
    }

    /// List the actor's own donations, newest first.
    pub async fn list_own(&self, actor: &profile::Model) -> AppResult<Vec<donation::Model>> {
        self.donation_repo.find_by_donor(&actor.id).await
    }

    /// Browse open donations for an orphanage-role account.
    ///
    /// Donations are ranked nearest-first when the actor already has an
    /// orphanage record; otherwise they stay most-recent-first and carry no
    /// distance.
    pub async fn browse_open(&self, actor: &profile::Model) -> AppResult<Vec<RankedDonation>> {
        if actor.role != ProfileRole::Orphanage {
            return Err(AppError::Forbidden(
                "Only orphanages can browse open donations".to_string(),
            ));
        }

        let donations = self.donation_repo.find_open_with_donor().await?;
        let origin = self
            .orphanage_repo
            .find_by_user(&actor.id)
            .await?
            .map(|o| (o.latitude, o.longitude));

        Ok(rank_donations(donations, origin, Utc::now().fixed_offset()))
    }

    /// Accept a pending donation.
    ///
    /// The actor must have an orphanage record; the transition is a
    /// conditional pending → accepted update that commits atomically with
    /// the donor's notification, so the donor is notified exactly once on
    /// success and never for a transition that did not stick.
    pub async fn accept(
        &self,
        actor: &profile::Model,
        donation_id: &str,
    ) -> AppResult<donation::Model> {
        if actor.role != ProfileRole::Orphanage {
            return Err(AppError::Forbidden(
                "Only orphanages can accept donations".to_string(),
            ));
        }

        // The one precondition the original app checked before any write:
        // no orphanage record, no accepting.
        let orphanage = self
            .orphanage_repo
            .find_by_user(&actor.id)
            .await?
            .ok_or_else(|| {
                AppError::Validation(
                    "Please complete your orphanage profile first".to_string(),
                )
            })?;

        let donation = self.donation_repo.get_by_id(donation_id).await?;
        let notification = self
            .notification_service
            .acceptance_notification(&donation, &orphanage);

        let won = self
            .donation_repo
            .transition_status(
                donation_id,
                DonationStatus::Pending,
                DonationStatus::Accepted,
                Some(&orphanage.id),
                Some(notification),
            )
            .await?;

        if !won {
            return Err(AppError::Conflict(format!(
                "Donation {donation_id} is no longer pending"
            )));
        }

        tracing::info!(
            donation_id = %donation_id,
            orphanage_id = %orphanage.id,
            donor_id = %donation.donor_id,
            "Donation accepted"
        );

        self.donation_repo.get_by_id(donation_id).await
    }

    /// Reject a pending donation.
    ///
    /// Any orphanage-role account may reject; no notification is sent.
    pub async fn reject(
        &self,
        actor: &profile::Model,
        donation_id: &str,
    ) -> AppResult<donation::Model> {
        if actor.role != ProfileRole::Orphanage {
            return Err(AppError::Forbidden(
                "Only orphanages can reject donations".to_string(),
            ));
        }

        // Ensure the donation exists before reporting a conflict.
        self.donation_repo.get_by_id(donation_id).await?;

        let won = self
            .donation_repo
            .transition_status(
                donation_id,
                DonationStatus::Pending,
                DonationStatus::Rejected,
                None,
                None,
            )
            .await?;

        if !won {
            return Err(AppError::Conflict(format!(
                "Donation {donation_id} is no longer pending"
            )));
        }

        tracing::info!(donation_id = %donation_id, "Donation rejected");

        self.donation_repo.get_by_id(donation_id).await
    }

    /// Mark an accepted donation as completed.
    ///
    /// Only the orphanage recorded in `accepted_by` may complete.
    pub async fn complete(
        &self,
        actor: &profile::Model,
        donation_id: &str,
    ) -> AppResult<donation::Model> {
        if actor.role != ProfileRole::Orphanage {
            return Err(AppError::Forbidden(
                "Only orphanages can complete donations".to_string(),
            ));
        }

        let orphanage = self
            .orphanage_repo
            .find_by_user(&actor.id)
            .await?
            .ok_or_else(|| {
                AppError::Validation(
                    "Please complete your orphanage profile first".to_string(),
                )
            })?;

        let donation = self.donation_repo.get_by_id(donation_id).await?;

        if donation.accepted_by.as_deref() != Some(orphanage.id.as_str()) {
            return Err(AppError::Forbidden(
                "Only the accepting orphanage can complete this donation".to_string(),
            ));
        }

        let won = self
            .donation_repo
            .transition_status(
                donation_id,
                DonationStatus::Accepted,
                DonationStatus::Completed,
                None,
                None,
            )
            .await?;

        if !won {
            return Err(AppError::Conflict(format!(
                "Donation {donation_id} is not in the accepted state"
            )));
        }

        tracing::info!(
            donation_id = %donation_id,
            orphanage_id = %orphanage.id,
            "Donation completed"
        );

        self.donation_repo.get_by_id(donation_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn valid_input() -> NewDonation {
        NewDonation {
            food_type: "Rice".to_string(),
            quantity: "10kg".to_string(),
            expiry_time: Utc::now().fixed_offset() + Duration::hours(6),
            location: "12 Harbor Street".to_string(),
            latitude: 40.7128,
            longitude: -74.0060,
            notes: None,
        }
    }

    #[test]
    fn test_new_donation_validation() {
        assert!(valid_input().validate().is_ok());

        let mut missing_food = valid_input();
        missing_food.food_type = String::new();
        assert!(missing_food.validate().is_err());

        let mut bad_latitude = valid_input();
        bad_latitude.latitude = 91.0;
        assert!(bad_latitude.validate().is_err());

        let mut bad_longitude = valid_input();
        bad_longitude.longitude = -200.0;
        assert!(bad_longitude.validate().is_err());
    }
}
