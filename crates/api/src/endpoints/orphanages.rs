//! Orphanage endpoints.

use axum::{Json, Router, extract::State, routing::post};
use mealbridge_common::AppResult;
use mealbridge_core::UpsertOrphanage;
use mealbridge_db::entities::orphanage::Model as OrphanageModel;
use serde::Serialize;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Orphanage response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrphanageResponse {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub latitude: f64,
    pub longitude: f64,
    pub capacity: i32,
    pub verified: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<OrphanageModel> for OrphanageResponse {
    fn from(o: OrphanageModel) -> Self {
        Self {
            id: o.id,
            user_id: o.user_id,
            name: o.name,
            address: o.address,
            phone: o.phone,
            latitude: o.latitude,
            longitude: o.longitude,
            capacity: o.capacity,
            verified: o.verified,
            created_at: o.created_at.to_rfc3339(),
            updated_at: o.updated_at.to_rfc3339(),
        }
    }
}

/// Get the authenticated user's own orphanage record, if any.
async fn own_orphanage(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Option<OrphanageResponse>>> {
    let orphanage = state.orphanage_service.get_own(&user).await?;
    Ok(ApiResponse::ok(orphanage.map(Into::into)))
}

/// Create or update the authenticated user's orphanage record.
async fn upsert_orphanage(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpsertOrphanage>,
) -> AppResult<ApiResponse<OrphanageResponse>> {
    let orphanage = state.orphanage_service.upsert(&user, req).await?;
    Ok(ApiResponse::ok(orphanage.into()))
}

/// List verified orphanages for the donor-facing directory.
async fn verified_orphanages(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<OrphanageResponse>>> {
    let orphanages = state.orphanage_service.list_verified().await?;
    Ok(ApiResponse::ok(
        orphanages.into_iter().map(Into::into).collect(),
    ))
}

/// Create the orphanages router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", post(own_orphanage))
        .route("/upsert", post(upsert_orphanage))
        .route("/verified", post(verified_orphanages))
}
