use axum::{routing::post, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/agencies/:agency_id/shifts",
            post(handlers::shifts::create_shift),
        )
        .route(
            "/api/agencies/:agency_id/shifts/bulk",
            post(handlers::shifts::create_bulk),
        )
        .route(
            "/api/agencies/:agency_id/shifts/confirm",
            post(handlers::shifts::confirm_shift),
        )
        .route(
            "/api/agencies/:agency_id/shifts/cancel",
            post(handlers::shifts::cancel_shift),
        )
        .route(
            "/api/agencies/:agency_id/shifts/copy",
            post(handlers::shifts::copy_shift),
        )
}
