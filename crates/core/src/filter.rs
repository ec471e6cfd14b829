use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::shift::{ScheduledShift, ShiftStatus};

/// Value the selection menus send for "no filter".
pub const ALL: &str = "all";

/// Read-only narrowing of the loaded shifts by caregiver and care recipient.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftFilter {
    pub caregiver: Option<String>,
    pub elder: Option<String>,
}

fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(ALL))
        .map(str::to_string)
}

impl ShiftFilter {
    pub fn new(caregiver: Option<&str>, elder: Option<&str>) -> Self {
        Self {
            caregiver: normalize(caregiver),
            elder: normalize(elder),
        }
    }

    pub fn matches(&self, shift: &ScheduledShift) -> bool {
        let caregiver_ok = self
            .caregiver
            .as_deref()
            .is_none_or(|id| shift.caregiver_id == id);
        let elder_ok = self.elder.as_deref().is_none_or(|id| shift.elder_id == id);

        caregiver_ok && elder_ok
    }

    pub fn apply<'a>(&self, shifts: &'a [ScheduledShift]) -> Vec<&'a ScheduledShift> {
        shifts.iter().filter(|shift| self.matches(shift)).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShiftSummary {
    pub total_shifts: usize,
    pub total_hours: f64,
    pub distinct_caregivers: usize,
    /// Shifts still waiting for confirmation
    pub scheduled: usize,
}

impl ShiftSummary {
    pub fn from_shifts<'a>(shifts: impl IntoIterator<Item = &'a ScheduledShift>) -> Self {
        let mut summary = ShiftSummary::default();
        let mut caregivers = HashSet::new();

        for shift in shifts {
            summary.total_shifts += 1;
            summary.total_hours += shift.hours();
            caregivers.insert(shift.caregiver_id.as_str());
            if shift.status == ShiftStatus::Scheduled {
                summary.scheduled += 1;
            }
        }

        summary.distinct_caregivers = caregivers.len();
        summary
    }
}

/// Buckets shifts per calendar day, keeping start time order inside a day.
pub fn group_by_date<'a>(
    shifts: impl IntoIterator<Item = &'a ScheduledShift>,
) -> BTreeMap<NaiveDate, Vec<&'a ScheduledShift>> {
    let mut days: BTreeMap<NaiveDate, Vec<&'a ScheduledShift>> = BTreeMap::new();
    for shift in shifts {
        days.entry(shift.date).or_default().push(shift);
    }
    for day in days.values_mut() {
        day.sort_by(|a, b| a.start_time.cmp(&b.start_time));
    }
    days
}
