//! In-process scheduling backend for local runs and tests.
//!
//! Mirrors the hosted service's observable behavior closely enough to drive
//! the scheduler: creations are rejected when the caregiver already has an
//! overlapping, non-cancelled shift on that date, and confirm/cancel follow
//! the status rules.

use std::collections::HashMap;

use async_trait::async_trait;
use carehive_core::{
    models::{
        directory::{CaregiverAssignment, Elder},
        shift::{NewShift, ScheduledShift, ServiceResponse, ShiftConflict, ShiftStatus},
    },
    role::{AgencyMembership, AgencyRole, UserProfile},
    time::duration_minutes,
};
use chrono::{NaiveDate, Utc};
use eyre::Result;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{AgencyDirectory, ShiftService};

fn overlaps(a: &ScheduledShift, b: &NewShift) -> bool {
    a.caregiver_id == b.caregiver_id
        && a.date == b.date
        && a.status != ShiftStatus::Cancelled
        && a.start_time.as_str() < b.end_time.as_str()
        && b.start_time.as_str() < a.end_time.as_str()
}

#[derive(Default)]
pub struct InMemoryShiftService {
    shifts: RwLock<Vec<ScheduledShift>>,
}

impl InMemoryShiftService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shifts(shifts: Vec<ScheduledShift>) -> Self {
        Self {
            shifts: RwLock::new(shifts),
        }
    }

    pub async fn get(&self, shift_id: &str) -> Option<ScheduledShift> {
        self.shifts
            .read()
            .await
            .iter()
            .find(|s| s.id == shift_id)
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.shifts.read().await.len()
    }
}

#[async_trait]
impl ShiftService for InMemoryShiftService {
    async fn create_shift(&self, shift: &NewShift) -> Result<ServiceResponse> {
        let duration = match duration_minutes(&shift.start_time, &shift.end_time) {
            Ok(minutes) => minutes,
            Err(e) => return Ok(ServiceResponse::failed(e.user_message())),
        };

        let mut shifts = self.shifts.write().await;
        if let Some(existing) = shifts.iter().find(|s| overlaps(s, shift)) {
            return Ok(ServiceResponse::conflicted(ShiftConflict {
                message: format!(
                    "{} already has a shift from {} to {} on {}",
                    existing.caregiver_name, existing.start_time, existing.end_time, existing.date
                ),
                conflicting_shift_id: Some(existing.id.clone()),
            }));
        }

        let id = Uuid::new_v4().to_string();
        shifts.push(ScheduledShift {
            id: id.clone(),
            agency_id: shift.agency_id.clone(),
            group_id: shift.group_id.clone(),
            elder_id: shift.elder_id.clone(),
            elder_name: shift.elder_name.clone(),
            caregiver_id: shift.caregiver_id.clone(),
            caregiver_name: shift.caregiver_name.clone(),
            date: shift.date,
            start_time: shift.start_time.clone(),
            end_time: shift.end_time.clone(),
            duration,
            status: ShiftStatus::Scheduled,
            notes: shift.notes.clone(),
            is_recurring: shift.is_recurring,
            created_at: Utc::now(),
        });

        Ok(ServiceResponse::ok(Some(id)))
    }

    async fn confirm_shift(&self, shift_id: &str, _user_id: &str) -> Result<ServiceResponse> {
        let mut shifts = self.shifts.write().await;
        let Some(shift) = shifts.iter_mut().find(|s| s.id == shift_id) else {
            return Ok(ServiceResponse::failed("Shift not found"));
        };

        if shift.status != ShiftStatus::Scheduled {
            return Ok(ServiceResponse::failed("Shift is not awaiting confirmation"));
        }

        shift.status = ShiftStatus::Confirmed;
        Ok(ServiceResponse::ok(Some(shift.id.clone())))
    }

    async fn cancel_shift(
        &self,
        shift_id: &str,
        _user_id: &str,
        _reason: &str,
    ) -> Result<ServiceResponse> {
        let mut shifts = self.shifts.write().await;
        let Some(shift) = shifts.iter_mut().find(|s| s.id == shift_id) else {
            return Ok(ServiceResponse::failed("Shift not found"));
        };

        if !shift.can_modify() {
            return Ok(ServiceResponse::failed("Shift can no longer be cancelled"));
        }

        shift.status = ShiftStatus::Cancelled;
        Ok(ServiceResponse::ok(Some(shift.id.clone())))
    }

    async fn get_scheduled_shifts(
        &self,
        agency_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ScheduledShift>> {
        let mut found: Vec<ScheduledShift> = self
            .shifts
            .read()
            .await
            .iter()
            .filter(|s| s.agency_id == agency_id && start <= s.date && s.date <= end)
            .cloned()
            .collect();

        found.sort_by(|a, b| (a.date, &a.start_time).cmp(&(b.date, &b.start_time)));
        Ok(found)
    }
}

/// Directory backed by fixed data, keyed by agency id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    pub names: HashMap<String, String>,
    pub assignments: HashMap<String, Vec<CaregiverAssignment>>,
    pub elders: HashMap<String, Vec<Elder>>,
    pub profiles: HashMap<String, UserProfile>,
}

impl InMemoryDirectory {
    /// Directory holding a single super admin of `agency_id`.
    pub fn with_admin(user_id: &str, agency_id: &str) -> Self {
        let profile = UserProfile {
            id: user_id.to_string(),
            name: None,
            agencies: Some(vec![AgencyMembership {
                agency_id: agency_id.to_string(),
                role: Some(AgencyRole::SuperAdmin),
            }]),
            groups: None,
        };

        Self {
            profiles: HashMap::from([(user_id.to_string(), profile)]),
            ..Self::default()
        }
    }
}

#[async_trait]
impl AgencyDirectory for InMemoryDirectory {
    async fn resolve_names(
        &self,
        user_ids: &[String],
        _agency_id: &str,
    ) -> Result<HashMap<String, String>> {
        Ok(user_ids
            .iter()
            .filter_map(|id| self.names.get(id).map(|name| (id.clone(), name.clone())))
            .collect())
    }

    async fn caregiver_assignments(&self, agency_id: &str) -> Result<Vec<CaregiverAssignment>> {
        Ok(self.assignments.get(agency_id).cloned().unwrap_or_default())
    }

    async fn elders(&self, agency_id: &str) -> Result<Vec<Elder>> {
        Ok(self.elders.get(agency_id).cloned().unwrap_or_default())
    }

    async fn user_profile(&self, user_id: &str) -> Result<Option<UserProfile>> {
        Ok(self.profiles.get(user_id).cloned())
    }
}
