//! API endpoints.

mod donations;
mod notifications;
mod orphanages;
mod profiles;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/donations", donations::router())
        .nest("/orphanages", orphanages::router())
        .nest("/notifications", notifications::router())
        .nest("/profiles", profiles::router())
}
