//! # Caregiver directory
//!
//! Caregivers shown in the calendar legend and the filter menus come from
//! two places: the agency's active assignments and the caregivers already
//! on loaded shifts. Ids are deduplicated in order of first appearance and
//! their names are resolved with a single batch lookup.

use std::collections::{HashMap, HashSet};

use carehive_core::models::{
    directory::{caregiver_color, CaregiverAssignment, CaregiverInfo},
    shift::ScheduledShift,
};
use tracing::{debug, warn};

use crate::AgencyDirectory;

/// Caregiver ids in first-appearance order: active assignments, then shifts.
pub fn collect_caregiver_ids(
    assignments: &[CaregiverAssignment],
    shifts: &[ScheduledShift],
) -> Vec<String> {
    let mut seen = HashSet::new();
    let assignment_ids = assignments
        .iter()
        .filter(|a| a.active)
        .map(|a| a.caregiver_id.as_str());
    let shift_ids = shifts.iter().map(|s| s.caregiver_id.as_str());

    assignment_ids
        .chain(shift_ids)
        .filter(|id| !id.is_empty())
        .filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect()
}

/// Builds the caregiver list for a calendar view.
///
/// A failed lookup never fails the view: names fall back to the caregiver
/// name stored on a shift, then to the id itself.
pub async fn resolve_caregivers<D>(
    directory: &D,
    agency_id: &str,
    assignments: &[CaregiverAssignment],
    shifts: &[ScheduledShift],
) -> Vec<CaregiverInfo>
where
    D: AgencyDirectory + ?Sized,
{
    let ids = collect_caregiver_ids(assignments, shifts);
    if ids.is_empty() {
        return Vec::new();
    }

    debug!("Resolving {} caregiver names for agency {}", ids.len(), agency_id);
    let names = match directory.resolve_names(&ids, agency_id).await {
        Ok(names) => names,
        Err(e) => {
            warn!("Caregiver name lookup failed for agency {}: {}", agency_id, e);
            HashMap::new()
        }
    };

    ids.into_iter()
        .enumerate()
        .map(|(index, id)| {
            let name = names
                .get(&id)
                .filter(|name| !name.trim().is_empty())
                .cloned()
                .or_else(|| {
                    shifts
                        .iter()
                        .find(|s| s.caregiver_id == id && !s.caregiver_name.is_empty())
                        .map(|s| s.caregiver_name.clone())
                })
                .unwrap_or_else(|| id.clone());

            CaregiverInfo {
                id,
                name,
                color: caregiver_color(index).to_string(),
            }
        })
        .collect()
}
