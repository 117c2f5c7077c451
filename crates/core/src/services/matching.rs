//! Matching and ranking of open donations.
//!
//! Pure, read-only derivations over a fetched donation list: great-circle
//! distance from an orphanage to each pickup point, and the expiring-soon
//! emphasis flag. Nothing here touches the database.

use chrono::{DateTime, Duration, FixedOffset};
use mealbridge_common::haversine_km;
use mealbridge_db::entities::{donation, profile};

/// A donation is flagged expiring-soon inside this window.
const EXPIRY_WINDOW_HOURS: i64 = 3;

/// An open donation decorated for display.
#[derive(Debug, Clone)]
pub struct RankedDonation {
    /// The donation itself.
    pub donation: donation::Model,
    /// Display name of the donor, when the join produced one.
    pub donor_name: Option<String>,
    /// Distance from the viewing orphanage to the pickup point.
    /// `None` when the viewer has no orphanage record yet.
    pub distance_km: Option<f64>,
    /// Whether the donation expires within the emphasis window.
    pub expiring_soon: bool,
}

/// Whether a donation expires within the next three hours.
#[must_use]
pub fn is_expiring_soon(expiry_time: DateTime<FixedOffset>, now: DateTime<FixedOffset>) -> bool {
    expiry_time < now + Duration::hours(EXPIRY_WINDOW_HOURS)
}

/// Decorate and rank open donations for a viewer.
///
/// `origin` is the viewer's orphanage coordinates. With an origin the list is
/// stably sorted ascending by distance, so equal distances keep their input
/// order (most-recent-first from the fetch). Without one, no distance is
/// computed and the input order is preserved.
#[must_use]
pub fn rank_donations(
    donations: Vec<(donation::Model, Option<profile::Model>)>,
    origin: Option<(f64, f64)>,
    now: DateTime<FixedOffset>,
) -> Vec<RankedDonation> {
    let mut ranked: Vec<RankedDonation> = donations
        .into_iter()
        .map(|(d, donor)| {
            let distance_km = origin
                .map(|(lat, lon)| haversine_km(lat, lon, d.latitude, d.longitude));
            let expiring_soon = is_expiring_soon(d.expiry_time, now);
            RankedDonation {
                donor_name: donor.map(|p| p.full_name),
                distance_km,
                expiring_soon,
                donation: d,
            }
        })
        .collect();

    if origin.is_some() {
        // sort_by is stable: ties retain most-recent-first input order.
        ranked.sort_by(|a, b| {
            a.distance_km
                .unwrap_or(f64::MAX)
                .total_cmp(&b.distance_km.unwrap_or(f64::MAX))
        });
    }

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mealbridge_db::entities::donation::DonationStatus;

    fn donation_at(id: &str, lat: f64, lon: f64, expiry: DateTime<FixedOffset>) -> donation::Model {
        let now = Utc::now().fixed_offset();
        donation::Model {
            id: id.to_string(),
            donor_id: "donor1".to_string(),
            food_type: "Rice".to_string(),
            quantity: "10kg".to_string(),
            expiry_time: expiry,
            location: "somewhere".to_string(),
            latitude: lat,
            longitude: lon,
            notes: None,
            status: DonationStatus::Pending,
            accepted_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_nearest_donation_ranks_first() {
        let now = Utc::now().fixed_offset();
        let expiry = now + Duration::hours(6);
        // Input is most-recent-first: the farther donation comes first.
        let input = vec![
            (donation_at("far", 0.0, 2.0, expiry), None),
            (donation_at("near", 0.0, 1.0, expiry), None),
        ];

        let ranked = rank_donations(input, Some((0.0, 0.0)), now);
        assert_eq!(ranked[0].donation.id, "near");
        assert_eq!(ranked[1].donation.id, "far");

        // 1 degree of longitude at the equator is about 111.19 km.
        let d = ranked[0].distance_km.unwrap();
        assert!((d - 111.19).abs() < 0.01, "got {d}");
    }

    #[test]
    fn test_no_origin_preserves_input_order() {
        let now = Utc::now().fixed_offset();
        let expiry = now + Duration::hours(6);
        let input = vec![
            (donation_at("newest", 0.0, 2.0, expiry), None),
            (donation_at("older", 0.0, 1.0, expiry), None),
        ];

        let ranked = rank_donations(input, None, now);
        assert_eq!(ranked[0].donation.id, "newest");
        assert_eq!(ranked[1].donation.id, "older");
        assert!(ranked[0].distance_km.is_none());
    }

    #[test]
    fn test_equal_distances_keep_input_order() {
        let now = Utc::now().fixed_offset();
        let expiry = now + Duration::hours(6);
        // Same pickup point, so identical distances.
        let input = vec![
            (donation_at("newest", 0.0, 1.0, expiry), None),
            (donation_at("older", 0.0, 1.0, expiry), None),
        ];

        let ranked = rank_donations(input, Some((0.0, 0.0)), now);
        assert_eq!(ranked[0].donation.id, "newest");
        assert_eq!(ranked[1].donation.id, "older");
    }

    #[test]
    fn test_expiring_soon_window() {
        let now = Utc::now().fixed_offset();
        assert!(is_expiring_soon(now + Duration::hours(1), now));
        assert!(!is_expiring_soon(now + Duration::hours(4), now));
    }

    #[test]
    fn test_donor_name_carried_through() {
        let now = Utc::now().fixed_offset();
        let expiry = now + Duration::hours(6);
        let donor = profile::Model {
            id: "donor1".to_string(),
            email: "donor1@example.com".to_string(),
            full_name: "Alex Donor".to_string(),
            role: mealbridge_db::entities::profile::ProfileRole::Donor,
            phone: None,
            address: None,
            latitude: None,
            longitude: None,
            created_at: now,
            updated_at: now,
        };

        let ranked = rank_donations(
            vec![(donation_at("d1", 0.0, 1.0, expiry), Some(donor))],
            None,
            now,
        );
        assert_eq!(ranked[0].donor_name.as_deref(), Some("Alex Donor"));
    }
}
