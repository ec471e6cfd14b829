use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/api/agencies/:agency_id/calendar",
        get(handlers::calendar::get_calendar),
    )
}
