//! Database entities.

pub mod donation;
pub mod notification;
pub mod orphanage;
pub mod profile;

pub use donation::Entity as Donation;
pub use notification::Entity as Notification;
pub use orphanage::Entity as Orphanage;
pub use profile::Entity as Profile;
