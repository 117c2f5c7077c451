//! Business logic services.

pub mod donation;
pub mod matching;
pub mod notification;
pub mod orphanage;
pub mod profile;

pub use donation::{DonationService, NewDonation};
pub use matching::{RankedDonation, is_expiring_soon, rank_donations};
pub use notification::NotificationService;
pub use orphanage::{OrphanageService, UpsertOrphanage};
pub use profile::{ProfileService, UpdateProfile};
