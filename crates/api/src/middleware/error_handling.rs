//! # Error Handling Middleware
//!
//! Maps scheduler errors to HTTP status codes and JSON error bodies so every
//! endpoint fails the same way. The body carries the message the dashboard
//! shows inline next to the dialog that failed.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use carehive_core::errors::ScheduleError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use carehive_api::middleware::error_handling::AppError;
/// use carehive_core::errors::ScheduleError;
///
/// async fn handler(start: String, end: String) -> Result<Json<i64>, AppError> {
///     let minutes = carehive_core::time::duration_minutes(&start, &end)?;
///     Ok(Json(minutes))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub ScheduleError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ScheduleError::NotFound(_) => StatusCode::NOT_FOUND,
            ScheduleError::Validation(_) => StatusCode::BAD_REQUEST,
            ScheduleError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ScheduleError::Authorization(_) => StatusCode::FORBIDDEN,
            ScheduleError::Conflict(_) => StatusCode::CONFLICT,
            ScheduleError::Service(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ScheduleError::Transport(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        }

        let body = Json(json!({ "error": self.0.user_message() }));
        (status, body).into_response()
    }
}

/// Allows `?` on `ScheduleResult` inside handlers
impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        AppError(err)
    }
}

/// Collaborator failures surface as gateway errors
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(ScheduleError::Transport(err))
    }
}
