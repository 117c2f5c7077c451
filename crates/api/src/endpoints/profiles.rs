//! Profile endpoints.

use axum::{Json, Router, extract::State, routing::post};
use mealbridge_common::AppResult;
use mealbridge_core::UpdateProfile;
use mealbridge_db::entities::profile::{Model as ProfileModel, ProfileRole};
use serde::Serialize;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Profile response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: ProfileRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ProfileModel> for ProfileResponse {
    fn from(p: ProfileModel) -> Self {
        Self {
            id: p.id,
            email: p.email,
            full_name: p.full_name,
            role: p.role,
            phone: p.phone,
            address: p.address,
            latitude: p.latitude,
            longitude: p.longitude,
            created_at: p.created_at.to_rfc3339(),
            updated_at: p.updated_at.to_rfc3339(),
        }
    }
}

/// Get the authenticated user's own profile.
async fn own_profile(AuthUser(user): AuthUser) -> AppResult<ApiResponse<ProfileResponse>> {
    Ok(ApiResponse::ok(user.into()))
}

/// Update the authenticated user's contact fields.
async fn update_profile(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpdateProfile>,
) -> AppResult<ApiResponse<ProfileResponse>> {
    let profile = state.profile_service.update(&user, req).await?;
    Ok(ApiResponse::ok(profile.into()))
}

/// Create the profiles router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", post(own_profile))
        .route("/update", post(update_profile))
}
