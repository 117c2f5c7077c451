//! API middleware.

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use mealbridge_core::{DonationService, NotificationService, OrphanageService, ProfileService};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub donation_service: DonationService,
    pub orphanage_service: OrphanageService,
    pub notification_service: NotificationService,
    pub profile_service: ProfileService,
}

/// Authentication middleware.
///
/// Token verification belongs to the external identity layer; by the time a
/// request reaches this service the bearer value is the authenticated
/// subject (profile) id. This middleware resolves it to a profile row so
/// handlers get a full actor via [`crate::extractors::AuthUser`].
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(subject) = auth_str.strip_prefix("Bearer ")
    {
        // Resolve the subject to a profile
        match state.profile_service.get(subject).await {
            Ok(profile) => {
                req.extensions_mut().insert(profile);
            }
            Err(e) => {
                tracing::debug!(error = %e, "Failed to resolve request subject");
            }
        }
    }

    next.run(req).await
}
