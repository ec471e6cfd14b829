pub mod calendar;
pub mod selection;
pub mod shifts;

use carehive_core::{
    errors::{ScheduleError, ScheduleResult},
    models::shift::ScheduledShift,
};
use carehive_service::context::SchedulerContext;
use chrono::{Local, NaiveDate};

use crate::{middleware::actor::Actor, ApiState};

/// Current local date. Past-date checks are made against it.
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Resolves the acting user's context for an agency, refusing non-admins.
pub(crate) async fn scheduler_context(
    state: &ApiState,
    actor: &Actor,
    agency_id: &str,
) -> ScheduleResult<SchedulerContext> {
    SchedulerContext::load(state.directory.as_ref(), &actor.user_id, agency_id).await
}

/// Finds a shift of the agency on a given date.
pub(crate) async fn find_shift(
    state: &ApiState,
    agency_id: &str,
    shift_id: &str,
    date: NaiveDate,
) -> ScheduleResult<ScheduledShift> {
    state
        .shifts
        .get_scheduled_shifts(agency_id, date, date)
        .await?
        .into_iter()
        .find(|shift| shift.id == shift_id)
        .ok_or_else(|| ScheduleError::NotFound(format!("Shift with ID {} not found", shift_id)))
}
