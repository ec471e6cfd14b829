//! Identifies the acting user. Authentication happens upstream; requests
//! reach this API with the authenticated user id in the `x-user-id` header.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use carehive_core::errors::ScheduleError;

use super::error_handling::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                AppError(ScheduleError::Authentication(format!(
                    "Missing {} header",
                    USER_ID_HEADER
                )))
            })?;

        Ok(Actor {
            user_id: user_id.to_string(),
        })
    }
}
