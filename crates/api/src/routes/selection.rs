use axum::{routing::post, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/selection/pattern",
            post(handlers::selection::apply_pattern),
        )
        .route("/api/selection/toggle", post(handlers::selection::toggle_date))
}
