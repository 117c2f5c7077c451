//! Donation endpoints.

use axum::{Json, Router, extract::State, routing::post};
use mealbridge_common::AppResult;
use mealbridge_core::{NewDonation, RankedDonation};
use mealbridge_db::entities::donation::{DonationStatus, Model as DonationModel};
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Donation response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationResponse {
    pub id: String,
    pub donor_id: String,
    pub food_type: String,
    pub quantity: String,
    pub expiry_time: String,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: DonationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_by: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<DonationModel> for DonationResponse {
    fn from(d: DonationModel) -> Self {
        Self {
            id: d.id,
            donor_id: d.donor_id,
            food_type: d.food_type,
            quantity: d.quantity,
            expiry_time: d.expiry_time.to_rfc3339(),
            location: d.location,
            latitude: d.latitude,
            longitude: d.longitude,
            notes: d.notes,
            status: d.status,
            accepted_by: d.accepted_by,
            created_at: d.created_at.to_rfc3339(),
            updated_at: d.updated_at.to_rfc3339(),
        }
    }
}

/// Entry in the ranked open-donation listing.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedDonationResponse {
    #[serde(flatten)]
    pub donation: DonationResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    pub expiring_soon: bool,
}

impl From<RankedDonation> for RankedDonationResponse {
    fn from(r: RankedDonation) -> Self {
        Self {
            donation: r.donation.into(),
            donor_name: r.donor_name,
            distance_km: r.distance_km,
            expiring_soon: r.expiring_soon,
        }
    }
}

/// Donor's own donations, split into derived views.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnDonationsResponse {
    /// Pending and accepted donations.
    pub active: Vec<DonationResponse>,
    /// Completed and rejected donations.
    pub history: Vec<DonationResponse>,
}

/// Create a donation.
async fn create_donation(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<NewDonation>,
) -> AppResult<ApiResponse<DonationResponse>> {
    let donation = state.donation_service.create(&user, req).await?;
    Ok(ApiResponse::ok(donation.into()))
}

/// List the authenticated donor's own donations, split into active and
/// history. Both views are derived on read from the status field.
async fn own_donations(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<OwnDonationsResponse>> {
    let donations = state.donation_service.list_own(&user).await?;

    let (active, history): (Vec<_>, Vec<_>) = donations
        .into_iter()
        .partition(|d| d.status.is_open());

    Ok(ApiResponse::ok(OwnDonationsResponse {
        active: active.into_iter().map(Into::into).collect(),
        history: history.into_iter().map(Into::into).collect(),
    }))
}

/// Browse open donations, ranked nearest-first for the viewing orphanage.
async fn open_donations(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<RankedDonationResponse>>> {
    let listing = state.donation_service.browse_open(&user).await?;
    Ok(ApiResponse::ok(listing.into_iter().map(Into::into).collect()))
}

/// Transition request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionRequest {
    pub donation_id: String,
}

/// Accept a pending donation.
async fn accept_donation(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<TransitionRequest>,
) -> AppResult<ApiResponse<DonationResponse>> {
    let donation = state
        .donation_service
        .accept(&user, &req.donation_id)
        .await?;
    Ok(ApiResponse::ok(donation.into()))
}

/// Reject a pending donation.
async fn reject_donation(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<TransitionRequest>,
) -> AppResult<ApiResponse<DonationResponse>> {
    let donation = state
        .donation_service
        .reject(&user, &req.donation_id)
        .await?;
    Ok(ApiResponse::ok(donation.into()))
}

/// Mark an accepted donation as completed.
async fn complete_donation(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<TransitionRequest>,
) -> AppResult<ApiResponse<DonationResponse>> {
    let donation = state
        .donation_service
        .complete(&user, &req.donation_id)
        .await?;
    Ok(ApiResponse::ok(donation.into()))
}

/// Create the donations router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_donation))
        .route("/mine", post(own_donations))
        .route("/open", post(open_donations))
        .route("/accept", post(accept_donation))
        .route("/reject", post(reject_donation))
        .route("/complete", post(complete_donation))
}
