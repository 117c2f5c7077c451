//! Account profile entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account roles.
///
/// The role is fixed at registration and never updated by this system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "camelCase")]
pub enum ProfileRole {
    #[sea_orm(string_value = "donor")]
    Donor,
    #[sea_orm(string_value = "orphanage")]
    Orphanage,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profile")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub email: String,

    /// Display name
    pub full_name: String,

    /// Account role (donor or orphanage)
    pub role: ProfileRole,

    /// Contact phone number
    #[sea_orm(nullable)]
    pub phone: Option<String>,

    /// Contact address
    #[sea_orm(nullable)]
    pub address: Option<String>,

    /// Latitude in decimal degrees
    #[sea_orm(nullable)]
    pub latitude: Option<f64>,

    /// Longitude in decimal degrees
    #[sea_orm(nullable)]
    pub longitude: Option<f64>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::donation::Entity")]
    Donation,

    #[sea_orm(has_one = "super::orphanage::Entity")]
    Orphanage,

    #[sea_orm(has_many = "super::notification::Entity")]
    Notification,
}

impl Related<super::donation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Donation.def()
    }
}

impl Related<super::orphanage::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orphanage.def()
    }
}

impl Related<super::notification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notification.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
