use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use carehive_core::models::shift::ShiftStatus;
use carehive_service::{
    bulk::{BulkObserver, BulkOutcome, BulkProgress, BulkShiftCreator, BulkShiftRequest},
    lifecycle::{ShiftActions, ShiftDraft},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{find_shift, scheduler_context, today};
use crate::{
    middleware::{actor::Actor, error_handling::AppError},
    ApiState,
};

/// Identifies a shift; the date narrows the backend lookup to one day.
#[derive(Debug, Clone, Deserialize)]
pub struct ShiftRef {
    pub shift_id: String,
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct CancelRequest {
    #[serde(flatten)]
    pub shift: ShiftRef,
    /// Second step of the cancellation
    #[serde(default)]
    pub confirmed: bool,
}

#[derive(Debug, Deserialize)]
pub struct CopyRequest {
    #[serde(flatten)]
    pub shift: ShiftRef,
    pub target_date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub shift_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub shift_id: String,
    pub status: ShiftStatus,
}

#[derive(Debug, Serialize)]
pub struct CancelResponse {
    pub shift_id: String,
    pub cancelled: bool,
    pub confirmation_required: bool,
}

#[derive(Debug, Serialize)]
pub struct BulkResponse {
    #[serde(flatten)]
    pub outcome: BulkOutcome,
    pub message: String,
}

/// Logs batch progress; the HTTP caller only sees the final outcome.
struct ProgressLog<'a> {
    agency_id: &'a str,
}

impl BulkObserver for ProgressLog<'_> {
    fn on_progress(&mut self, progress: &BulkProgress<'_>) {
        debug!(
            "Bulk creation for agency {}: {}/{} ({}%)",
            self.agency_id, progress.completed, progress.total, progress.percent
        );
    }

    fn on_complete(&mut self, outcome: &BulkOutcome) {
        info!(
            "Schedule of agency {} changed: {} shifts added",
            self.agency_id,
            outcome.success_count()
        );
    }
}

fn bulk_message(outcome: &BulkOutcome) -> String {
    if outcome.all_succeeded() {
        format!("Created {} shifts", outcome.success_count())
    } else {
        format!(
            "Created {} shifts, {} failed",
            outcome.success_count(),
            outcome.failure_count()
        )
    }
}

#[axum::debug_handler]
pub async fn create_shift(
    State(state): State<Arc<ApiState>>,
    Path(agency_id): Path<String>,
    actor: Actor,
    Json(payload): Json<ShiftDraft>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let ctx = scheduler_context(&state, &actor, &agency_id).await?;
    let shift_id = ShiftActions::new(state.shifts.as_ref(), &ctx)
        .create(&payload, today())
        .await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse { shift_id })))
}

#[axum::debug_handler]
pub async fn create_bulk(
    State(state): State<Arc<ApiState>>,
    Path(agency_id): Path<String>,
    actor: Actor,
    Json(payload): Json<BulkShiftRequest>,
) -> Result<Json<BulkResponse>, AppError> {
    let ctx = scheduler_context(&state, &actor, &agency_id).await?;
    let mut observer = ProgressLog {
        agency_id: &agency_id,
    };

    let outcome = BulkShiftCreator::new(state.shifts.as_ref())
        .run(&ctx, &payload, today(), &mut observer)
        .await?;

    Ok(Json(BulkResponse {
        message: bulk_message(&outcome),
        outcome,
    }))
}

#[axum::debug_handler]
pub async fn confirm_shift(
    State(state): State<Arc<ApiState>>,
    Path(agency_id): Path<String>,
    actor: Actor,
    Json(payload): Json<ShiftRef>,
) -> Result<Json<StatusResponse>, AppError> {
    let ctx = scheduler_context(&state, &actor, &agency_id).await?;
    let shift = find_shift(&state, &agency_id, &payload.shift_id, payload.date).await?;

    ShiftActions::new(state.shifts.as_ref(), &ctx)
        .confirm(&shift)
        .await?;

    Ok(Json(StatusResponse {
        shift_id: shift.id,
        status: ShiftStatus::Confirmed,
    }))
}

/// Without `confirmed` nothing is sent and the client is asked to confirm.
#[axum::debug_handler]
pub async fn cancel_shift(
    State(state): State<Arc<ApiState>>,
    Path(agency_id): Path<String>,
    actor: Actor,
    Json(payload): Json<CancelRequest>,
) -> Result<Json<CancelResponse>, AppError> {
    let ctx = scheduler_context(&state, &actor, &agency_id).await?;
    let shift = find_shift(&state, &agency_id, &payload.shift.shift_id, payload.shift.date).await?;

    let actions = ShiftActions::new(state.shifts.as_ref(), &ctx);
    let pending = actions.request_cancel(&shift)?;

    if !payload.confirmed {
        pending.abort();
        return Ok(Json(CancelResponse {
            shift_id: shift.id.clone(),
            cancelled: false,
            confirmation_required: true,
        }));
    }

    pending.confirm().await?;
    Ok(Json(CancelResponse {
        shift_id: shift.id.clone(),
        cancelled: true,
        confirmation_required: false,
    }))
}

#[axum::debug_handler]
pub async fn copy_shift(
    State(state): State<Arc<ApiState>>,
    Path(agency_id): Path<String>,
    actor: Actor,
    Json(payload): Json<CopyRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let ctx = scheduler_context(&state, &actor, &agency_id).await?;
    let shift = find_shift(&state, &agency_id, &payload.shift.shift_id, payload.shift.date).await?;

    let shift_id = ShiftActions::new(state.shifts.as_ref(), &ctx)
        .copy_to_date(&shift, payload.target_date, today())
        .await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse { shift_id })))
}
