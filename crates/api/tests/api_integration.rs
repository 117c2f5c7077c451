//! API integration tests.
//!
//! These tests verify the API endpoints work correctly together.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    Router, middleware,
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::Utc;
use mealbridge_api::{middleware::AppState, middleware::auth_middleware, router as api_router};
use mealbridge_core::{DonationService, NotificationService, OrphanageService, ProfileService};
use mealbridge_db::entities::profile::{self, ProfileRole};
use mealbridge_db::repositories::{
    DonationRepository, NotificationRepository, OrphanageRepository, ProfileRepository,
};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use std::sync::Arc;
use tower::ServiceExt;

fn donor_profile() -> profile::Model {
    let now = Utc::now().fixed_offset();
    profile::Model {
        id: "donor1".to_string(),
        email: "donor@example.com".to_string(),
        full_name: "Dana Donor".to_string(),
        role: ProfileRole::Donor,
        phone: None,
        address: None,
        latitude: None,
        longitude: None,
        created_at: now,
        updated_at: now,
    }
}

/// Create test app state over the given mock connection.
fn create_test_state(db: DatabaseConnection) -> AppState {
    let db = Arc::new(db);

    let profile_repo = ProfileRepository::new(Arc::clone(&db));
    let orphanage_repo = OrphanageRepository::new(Arc::clone(&db));
    let donation_repo = DonationRepository::new(Arc::clone(&db));
    let notification_repo = NotificationRepository::new(Arc::clone(&db));

    let notification_service = NotificationService::new(notification_repo);
    let donation_service = DonationService::new(
        donation_repo,
        orphanage_repo.clone(),
        notification_service.clone(),
    );
    let orphanage_service = OrphanageService::new(orphanage_repo);
    let profile_service = ProfileService::new(profile_repo);

    AppState {
        donation_service,
        orphanage_service,
        notification_service,
        profile_service,
    }
}

/// Create the test app with the auth middleware applied, as the server does.
fn create_app(state: AppState) -> Router {
    api_router()
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state)
}

#[tokio::test]
async fn test_profiles_me_without_auth_returns_401() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = create_app(create_test_state(db));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/profiles/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profiles_me_with_auth_returns_profile() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![donor_profile()]])
        .into_connection();
    let app = create_app(create_test_state(db));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/profiles/me")
                .header(header::AUTHORIZATION, "Bearer donor1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["data"]["email"], "donor@example.com");
    assert_eq!(json["data"]["role"], "donor");
}

#[tokio::test]
async fn test_unknown_subject_returns_401() {
    // Subject resolution finds no profile row, so the extractor rejects.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<profile::Model>::new()])
        .into_connection();
    let app = create_app(create_test_state(db));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/profiles/me")
                .header(header::AUTHORIZATION, "Bearer ghost")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_browse_open_as_donor_returns_403() {
    // Auth lookup succeeds with a donor profile; the listing is orphanage-only.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![donor_profile()]])
        .into_connection();
    let app = create_app(create_test_state(db));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/donations/open")
                .header(header::AUTHORIZATION, "Bearer donor1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"]["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_create_donation_with_invalid_json_returns_error() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![donor_profile()]])
        .into_connection();
    let app = create_app(create_test_state(db));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/donations/create")
                .header(header::AUTHORIZATION, "Bearer donor1")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_unknown_endpoint_returns_404() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = create_app(create_test_state(db));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/does-not-exist")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
