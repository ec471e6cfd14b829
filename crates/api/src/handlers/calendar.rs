use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    Json,
};
use carehive_core::{
    calendar::{step, ViewMode},
    filter::{group_by_date, ShiftFilter},
    models::shift::ScheduledShift,
};
use carehive_service::{
    calendar::{load_calendar, CalendarView},
    lifecycle::{available_actions, AvailableActions},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{scheduler_context, today};
use crate::{
    middleware::{actor::Actor, error_handling::AppError},
    ApiState,
};

#[derive(Debug, Default, Deserialize)]
pub struct CalendarQuery {
    /// `week` or `month`, defaults to week
    pub view: Option<String>,
    /// Any date inside the wanted window, defaults to today
    pub date: Option<NaiveDate>,
    pub caregiver: Option<String>,
    pub elder: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub shifts: Vec<ScheduledShift>,
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    #[serde(flatten)]
    pub calendar: CalendarView,
    /// Days of the window that have at least one visible shift
    pub days: Vec<CalendarDay>,
    /// Actions offered per shift id
    pub actions: BTreeMap<String, AvailableActions>,
    /// Reference dates for the previous and next window, absent at the
    /// edges of the representable calendar
    pub previous: Option<NaiveDate>,
    pub next: Option<NaiveDate>,
}

#[axum::debug_handler]
pub async fn get_calendar(
    State(state): State<Arc<ApiState>>,
    Path(agency_id): Path<String>,
    actor: Actor,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>, AppError> {
    scheduler_context(&state, &actor, &agency_id).await?;

    let view = match query.view.as_deref() {
        Some(view) => view.parse::<ViewMode>()?,
        None => ViewMode::default(),
    };
    let reference = query.date.unwrap_or_else(today);
    let filter = ShiftFilter::new(query.caregiver.as_deref(), query.elder.as_deref());

    let calendar = load_calendar(
        state.shifts.as_ref(),
        state.directory.as_ref(),
        &agency_id,
        view,
        reference,
        &filter,
    )
    .await?;

    let days = group_by_date(&calendar.shifts)
        .into_iter()
        .map(|(date, shifts)| CalendarDay {
            date,
            shifts: shifts.into_iter().cloned().collect(),
        })
        .collect();
    let actions = calendar
        .shifts
        .iter()
        .map(|shift| (shift.id.clone(), available_actions(shift)))
        .collect();

    Ok(Json(CalendarResponse {
        previous: step(view, reference, -1).ok(),
        next: step(view, reference, 1).ok(),
        days,
        actions,
        calendar,
    }))
}
