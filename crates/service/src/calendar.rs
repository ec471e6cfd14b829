use carehive_core::{
    calendar::{date_range, DateRange, ViewMode},
    errors::ScheduleResult,
    filter::{ShiftFilter, ShiftSummary},
    models::{
        directory::{CaregiverInfo, Elder},
        shift::ScheduledShift,
    },
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{directory::resolve_caregivers, AgencyDirectory, ShiftService};

/// Everything the schedule page renders for one week or month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarView {
    pub view: ViewMode,
    pub range: DateRange,
    /// Shifts in the range after filtering
    pub shifts: Vec<ScheduledShift>,
    pub summary: ShiftSummary,
    pub caregivers: Vec<CaregiverInfo>,
    pub elders: Vec<Elder>,
}

/// Loads the calendar window around `reference` for an agency.
///
/// Only the shift fetch can fail the load. Assignments and elders are menu
/// data; when their lookups fail the view is returned without them.
pub async fn load_calendar<S, D>(
    shifts: &S,
    directory: &D,
    agency_id: &str,
    view: ViewMode,
    reference: NaiveDate,
    filter: &ShiftFilter,
) -> ScheduleResult<CalendarView>
where
    S: ShiftService + ?Sized,
    D: AgencyDirectory + ?Sized,
{
    let range = date_range(view, reference)?;
    debug!(
        "Loading {:?} calendar for agency {}: {} to {}",
        view, agency_id, range.start, range.end
    );

    let loaded = shifts
        .get_scheduled_shifts(agency_id, range.start, range.end)
        .await?;

    let assignments = directory
        .caregiver_assignments(agency_id)
        .await
        .unwrap_or_else(|e| {
            warn!("Failed to load caregiver assignments for agency {}: {}", agency_id, e);
            Vec::new()
        });

    let elders = directory.elders(agency_id).await.unwrap_or_else(|e| {
        warn!("Failed to load elders for agency {}: {}", agency_id, e);
        Vec::new()
    });

    let caregivers = resolve_caregivers(directory, agency_id, &assignments, &loaded).await;

    let visible: Vec<ScheduledShift> = filter.apply(&loaded).into_iter().cloned().collect();
    let summary = ShiftSummary::from_shifts(&visible);

    Ok(CalendarView {
        view,
        range,
        shifts: visible,
        summary,
        caregivers,
        elders,
    })
}
