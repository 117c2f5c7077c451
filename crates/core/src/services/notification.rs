//! Notification service.

use chrono::Utc;
use mealbridge_common::{AppError, AppResult, IdGenerator};
use mealbridge_db::{
    entities::{donation, notification, orphanage},
    repositories::NotificationRepository,
};
use sea_orm::Set;

/// Notification service for business logic.
///
/// Acceptance is the only transition that notifies anyone; rejection and
/// completion deliberately stay silent.
#[derive(Clone)]
pub struct NotificationService {
    notification_repo: NotificationRepository,
    id_gen: IdGenerator,
}

/// Build the acceptance message shown to the donor.
#[must_use]
pub(crate) fn acceptance_message(
    donation: &donation::Model,
    orphanage: &orphanage::Model,
) -> String {
    format!(
        "Your donation of {} has been accepted by {}. Contact: {}, Address: {}",
        donation.food_type, orphanage.name, orphanage.phone, orphanage.address
    )
}

impl NotificationService {
    /// Create a new notification service.
    #[must_use]
    pub const fn new(notification_repo: NotificationRepository) -> Self {
        Self {
            notification_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Build the notification row telling a donor their donation was
    /// accepted, addressed to the donor and correlated with the donation.
    ///
    /// The caller inserts it inside the accepting transaction, so the
    /// transition and the notification commit or roll back together.
    #[must_use]
    pub fn acceptance_notification(
        &self,
        donation: &donation::Model,
        orphanage: &orphanage::Model,
    ) -> notification::ActiveModel {
        notification::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(donation.donor_id.clone()),
            donation_id: Set(Some(donation.id.clone())),
            message: Set(acceptance_message(donation, orphanage)),
            is_read: Set(false),
            created_at: Set(Utc::now().fixed_offset()),
        }
    }

    /// Get a user's notifications, newest first.
    pub async fn get_notifications(&self, user_id: &str) -> AppResult<Vec<notification::Model>> {
        self.notification_repo.find_by_user(user_id).await
    }

    /// Count a user's unread notifications.
    pub async fn count_unread(&self, user_id: &str) -> AppResult<u64> {
        self.notification_repo.count_unread(user_id).await
    }

    /// Mark one of the user's notifications as read.
    ///
    /// Only the recipient may mark a notification as read.
    pub async fn mark_as_read(&self, user_id: &str, notification_id: &str) -> AppResult<()> {
        let notification = self
            .notification_repo
            .find_by_id(notification_id)
            .await?
            .ok_or_else(|| AppError::NotFound(notification_id.to_string()))?;

        if notification.user_id != user_id {
            return Err(AppError::Forbidden(
                "Cannot mark another user's notification as read".to_string(),
            ));
        }

        self.notification_repo.mark_as_read(notification_id).await
    }

    /// Mark all of the user's notifications as read. Returns how many changed.
    pub async fn mark_all_as_read(&self, user_id: &str) -> AppResult<u64> {
        self.notification_repo.mark_all_as_read(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use mealbridge_db::entities::donation::DonationStatus;

    #[test]
    fn test_acceptance_message_format() {
        let now = Utc::now().fixed_offset();
        let donation = donation::Model {
            id: "d1".to_string(),
            donor_id: "donor1".to_string(),
            food_type: "Rice".to_string(),
            quantity: "10kg".to_string(),
            expiry_time: now + Duration::hours(1),
            location: "12 Harbor Street".to_string(),
            latitude: 0.0,
            longitude: 0.0,
            notes: None,
            status: DonationStatus::Pending,
            accepted_by: None,
            created_at: now,
            updated_at: now,
        };
        let orphanage = orphanage::Model {
            id: "o1".to_string(),
            user_id: "orph1".to_string(),
            name: "Sunrise Home".to_string(),
            address: "5 Hill Road".to_string(),
            phone: "555-0100".to_string(),
            latitude: 0.0,
            longitude: 1.0,
            capacity: 50,
            verified: true,
            created_at: now,
            updated_at: now,
        };

        assert_eq!(
            acceptance_message(&donation, &orphanage),
            "Your donation of Rice has been accepted by Sunrise Home. \
             Contact: 555-0100, Address: 5 Hill Road"
        );
    }
}
