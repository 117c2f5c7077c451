//! Donation repository.

use std::sync::Arc;

use crate::entities::{Donation, donation::{self, DonationStatus}, notification, profile};
use chrono::Utc;
use mealbridge_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait, UpdateResult,
    sea_query::Expr,
};

/// Donation repository for database operations.
#[derive(Clone)]
pub struct DonationRepository {
    db: Arc<DatabaseConnection>,
}

impl DonationRepository {
    /// Create a new donation repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a donation by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<donation::Model>> {
        Donation::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a donation by ID, failing if it does not exist.
    pub async fn get_by_id(&self, id: &str) -> AppResult<donation::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::DonationNotFound(id.to_string()))
    }

    /// Create a new donation.
    pub async fn create(&self, model: donation::ActiveModel) -> AppResult<donation::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List open donations (pending or accepted) with their donor profile,
    /// newest first.
    pub async fn find_open_with_donor(
        &self,
    ) -> AppResult<Vec<(donation::Model, Option<profile::Model>)>> {
        Donation::find()
            .filter(
                donation::Column::Status
                    .is_in([DonationStatus::Pending, DonationStatus::Accepted]),
            )
            .order_by_desc(donation::Column::CreatedAt)
            .find_also_related(crate::entities::Profile)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List all donations posted by a donor, newest first.
    pub async fn find_by_donor(&self, donor_id: &str) -> AppResult<Vec<donation::Model>> {
        Donation::find()
            .filter(donation::Column::DonorId.eq(donor_id))
            .order_by_desc(donation::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Conditionally transition a donation's status.
    ///
    /// Issues an `UPDATE ... WHERE id = ? AND status = ?` so that two racing
    /// actors cannot both move the same donation out of `from`; the loser
    /// sees zero rows affected. When `notify` is given it is inserted in the
    /// same transaction, so a winning transition and its notification commit
    /// or roll back together. Returns whether the row was updated.
    pub async fn transition_status(
        &self,
        id: &str,
        from: DonationStatus,
        to: DonationStatus,
        accepted_by: Option<&str>,
        notify: Option<notification::ActiveModel>,
    ) -> AppResult<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut update = Donation::update_many()
            .filter(donation::Column::Id.eq(id))
            .filter(donation::Column::Status.eq(from))
            .col_expr(donation::Column::Status, Expr::value(to))
            .col_expr(
                donation::Column::UpdatedAt,
                Expr::value(Utc::now().fixed_offset()),
            );

        if let Some(orphanage_id) = accepted_by {
            update = update.col_expr(donation::Column::AcceptedBy, Expr::value(orphanage_id));
        }

        let result: UpdateResult = update
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            txn.rollback()
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            return Ok(false);
        }

        if let Some(model) = notify {
            model
                .insert(&txn)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(true)
    }
}
