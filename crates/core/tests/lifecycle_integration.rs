//! Donation lifecycle integration tests.
//!
//! These tests require a running `PostgreSQL` instance.
//! Run with: `cargo test --test lifecycle_integration -- --ignored`

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use chrono::{Duration, Utc};
use mealbridge_common::AppError;
use mealbridge_core::{
    DonationService, NewDonation, NotificationService, OrphanageService, UpsertOrphanage,
};
use mealbridge_db::entities::donation::DonationStatus;
use mealbridge_db::entities::profile::{self, ProfileRole};
use mealbridge_db::repositories::{
    DonationRepository, NotificationRepository, OrphanageRepository, ProfileRepository,
};
use mealbridge_db::test_utils::TestDatabase;
use sea_orm::Set;

struct TestContext {
    db: TestDatabase,
    profiles: ProfileRepository,
    donations: DonationService,
    orphanages: OrphanageService,
    notifications: NotificationService,
}

async fn setup() -> TestContext {
    let db = TestDatabase::create_unique().await.unwrap();
    mealbridge_db::migrate(db.connection()).await.unwrap();

    let conn = Arc::new(db.conn.clone());
    let profiles = ProfileRepository::new(Arc::clone(&conn));
    let donation_repo = DonationRepository::new(Arc::clone(&conn));
    let orphanage_repo = OrphanageRepository::new(Arc::clone(&conn));
    let notification_repo = NotificationRepository::new(Arc::clone(&conn));

    let notifications = NotificationService::new(notification_repo);
    let donations = DonationService::new(
        donation_repo,
        orphanage_repo.clone(),
        notifications.clone(),
    );
    let orphanages = OrphanageService::new(orphanage_repo);

    TestContext {
        db,
        profiles,
        donations,
        orphanages,
        notifications,
    }
}

async fn seed_profile(ctx: &TestContext, id: &str, role: ProfileRole) -> profile::Model {
    let now = Utc::now().fixed_offset();
    ctx.profiles
        .create(profile::ActiveModel {
            id: Set(id.to_string()),
            email: Set(format!("{id}@example.com")),
            full_name: Set(format!("User {id}")),
            role: Set(role),
            phone: Set(None),
            address: Set(None),
            latitude: Set(None),
            longitude: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .await
        .unwrap()
}

fn rice_donation() -> NewDonation {
    NewDonation {
        food_type: "Rice".to_string(),
        quantity: "10kg".to_string(),
        expiry_time: Utc::now().fixed_offset() + Duration::hours(1),
        location: "12 Harbor Street".to_string(),
        latitude: 0.0,
        longitude: 0.0,
        notes: None,
    }
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_full_donation_lifecycle() {
    let ctx = setup().await;
    let donor = seed_profile(&ctx, "donor1", ProfileRole::Donor).await;
    let orphanage_account = seed_profile(&ctx, "orph1", ProfileRole::Orphanage).await;

    // Donor posts a donation at the equator.
    let donation = ctx.donations.create(&donor, rice_donation()).await.unwrap();
    assert_eq!(donation.status, DonationStatus::Pending);
    assert!(donation.accepted_by.is_none());

    // Orphanage registers one degree of longitude away.
    ctx.orphanages
        .upsert(
            &orphanage_account,
            UpsertOrphanage {
                name: "Sunrise Home".to_string(),
                address: "5 Hill Road".to_string(),
                phone: "555-0100".to_string(),
                latitude: 0.0,
                longitude: 1.0,
                capacity: 50,
            },
        )
        .await
        .unwrap();

    // The listing ranks the donation with the haversine distance and flags
    // the one-hour expiry as expiring soon.
    let listing = ctx.donations.browse_open(&orphanage_account).await.unwrap();
    assert_eq!(listing.len(), 1);
    let entry = &listing[0];
    assert_eq!(entry.donation.id, donation.id);
    let d = entry.distance_km.unwrap();
    assert!((d - 111.19).abs() < 0.01, "got {d}");
    assert!(entry.expiring_soon);
    assert_eq!(entry.donor_name.as_deref(), Some("User donor1"));

    // Accept: state moves, accepted_by is set, donor gets one notification.
    let accepted = ctx
        .donations
        .accept(&orphanage_account, &donation.id)
        .await
        .unwrap();
    assert_eq!(accepted.status, DonationStatus::Accepted);
    assert!(accepted.accepted_by.is_some());

    let inbox = ctx.notifications.get_notifications(&donor.id).await.unwrap();
    assert_eq!(inbox.len(), 1);
    assert!(inbox[0].message.contains("Rice"));
    assert!(inbox[0].message.contains("Sunrise Home"));
    assert!(inbox[0].message.contains("555-0100"));
    assert!(inbox[0].message.contains("5 Hill Road"));
    assert_eq!(inbox[0].donation_id.as_deref(), Some(donation.id.as_str()));

    // Complete: terminal afterwards.
    let completed = ctx
        .donations
        .complete(&orphanage_account, &donation.id)
        .await
        .unwrap();
    assert_eq!(completed.status, DonationStatus::Completed);

    let err = ctx
        .donations
        .complete(&orphanage_account, &donation.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // Completion did not notify anyone further.
    let inbox = ctx.notifications.get_notifications(&donor.id).await.unwrap();
    assert_eq!(inbox.len(), 1);

    ctx.db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_accept_requires_orphanage_record() {
    let ctx = setup().await;
    let donor = seed_profile(&ctx, "donor1", ProfileRole::Donor).await;
    let orphanage_account = seed_profile(&ctx, "orph1", ProfileRole::Orphanage).await;

    let donation = ctx.donations.create(&donor, rice_donation()).await.unwrap();

    // No orphanage record yet: accepting is blocked before any write.
    let err = ctx
        .donations
        .accept(&orphanage_account, &donation.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let unchanged = ctx.donations.list_own(&donor).await.unwrap();
    assert_eq!(unchanged[0].status, DonationStatus::Pending);
    assert!(
        ctx.notifications
            .get_notifications(&donor.id)
            .await
            .unwrap()
            .is_empty()
    );

    ctx.db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_losing_acceptor_gets_conflict() {
    let ctx = setup().await;
    let donor = seed_profile(&ctx, "donor1", ProfileRole::Donor).await;
    let first = seed_profile(&ctx, "orph1", ProfileRole::Orphanage).await;
    let second = seed_profile(&ctx, "orph2", ProfileRole::Orphanage).await;

    for (account, name) in [(&first, "Sunrise Home"), (&second, "Harbor House")] {
        ctx.orphanages
            .upsert(
                account,
                UpsertOrphanage {
                    name: name.to_string(),
                    address: "5 Hill Road".to_string(),
                    phone: "555-0100".to_string(),
                    latitude: 0.0,
                    longitude: 1.0,
                    capacity: 50,
                },
            )
            .await
            .unwrap();
    }

    let donation = ctx.donations.create(&donor, rice_donation()).await.unwrap();

    ctx.donations.accept(&first, &donation.id).await.unwrap();

    let err = ctx.donations.accept(&second, &donation.id).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // Exactly one notification: the winner's.
    let inbox = ctx.notifications.get_notifications(&donor.id).await.unwrap();
    assert_eq!(inbox.len(), 1);
    assert!(inbox[0].message.contains("Sunrise Home"));

    // Only the accepting orphanage can complete.
    let err = ctx.donations.complete(&second, &donation.id).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    ctx.db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_reject_is_silent_and_terminal() {
    let ctx = setup().await;
    let donor = seed_profile(&ctx, "donor1", ProfileRole::Donor).await;
    let orphanage_account = seed_profile(&ctx, "orph1", ProfileRole::Orphanage).await;

    let donation = ctx.donations.create(&donor, rice_donation()).await.unwrap();

    let rejected = ctx
        .donations
        .reject(&orphanage_account, &donation.id)
        .await
        .unwrap();
    assert_eq!(rejected.status, DonationStatus::Rejected);
    assert!(rejected.accepted_by.is_none());

    // No notification for a rejection.
    assert!(
        ctx.notifications
            .get_notifications(&donor.id)
            .await
            .unwrap()
            .is_empty()
    );

    // Rejected is terminal: it leaves the open listing and cannot be accepted.
    ctx.orphanages
        .upsert(
            &orphanage_account,
            UpsertOrphanage {
                name: "Sunrise Home".to_string(),
                address: "5 Hill Road".to_string(),
                phone: "555-0100".to_string(),
                latitude: 0.0,
                longitude: 1.0,
                capacity: 50,
            },
        )
        .await
        .unwrap();

    assert!(
        ctx.donations
            .browse_open(&orphanage_account)
            .await
            .unwrap()
            .is_empty()
    );
    let err = ctx
        .donations
        .accept(&orphanage_account, &donation.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    ctx.db.drop_database().await.unwrap();
}
