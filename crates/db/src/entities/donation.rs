//! Donation entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Donation lifecycle states.
///
/// `Pending` is the initial state; `Completed` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "camelCase")]
pub enum DonationStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl DonationStatus {
    /// States in which a donation is shown on the orphanage dashboard.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::Accepted)
    }

    /// Terminal states have no outgoing transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Rejected)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "donation")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// The donor who posted this donation
    pub donor_id: String,

    pub food_type: String,

    /// Free text, e.g. "50 servings" or "10kg"
    pub quantity: String,

    pub expiry_time: DateTimeWithTimeZone,

    /// Pickup address (free text)
    pub location: String,

    /// Pickup latitude in decimal degrees
    pub latitude: f64,

    /// Pickup longitude in decimal degrees
    pub longitude: f64,

    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,

    pub status: DonationStatus,

    /// The orphanage that accepted this donation.
    /// Set if and only if status is accepted or completed.
    #[sea_orm(nullable)]
    pub accepted_by: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::DonorId",
        to = "super::profile::Column::Id",
        on_delete = "Cascade"
    )]
    Donor,

    #[sea_orm(
        belongs_to = "super::orphanage::Entity",
        from = "Column::AcceptedBy",
        to = "super::orphanage::Column::Id",
        on_delete = "SetNull"
    )]
    Acceptor,
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Donor.def()
    }
}

impl Related<super::orphanage::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Acceptor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_states() {
        assert!(DonationStatus::Pending.is_open());
        assert!(DonationStatus::Accepted.is_open());
        assert!(!DonationStatus::Completed.is_open());
        assert!(!DonationStatus::Rejected.is_open());
    }

    #[test]
    fn test_terminal_states() {
        assert!(DonationStatus::Completed.is_terminal());
        assert!(DonationStatus::Rejected.is_terminal());
        assert!(!DonationStatus::Pending.is_terminal());
        assert!(!DonationStatus::Accepted.is_terminal());
    }
}
