//! Database repositories.

mod donation;
mod notification;
mod orphanage;
mod profile;

pub use donation::DonationRepository;
pub use notification::NotificationRepository;
pub use orphanage::OrphanageRepository;
pub use profile::ProfileRepository;
