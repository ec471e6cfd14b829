//! # Carehive Service
//!
//! Async side of the shift scheduler. The scheduling backend and the agency
//! directory are external services; this crate talks to them through the
//! [`ShiftService`] and [`AgencyDirectory`] traits and builds the scheduler
//! operations on top:
//!
//! - **calendar**: load a week or month of shifts with resolved caregivers
//! - **bulk**: sequential bulk creation with progress reporting
//! - **lifecycle**: confirm, two-step cancel, and copy of a single shift
//! - **context**: who is acting, and whether they may manage the schedule

pub mod bulk;
pub mod calendar;
pub mod context;
pub mod directory;
pub mod http;
pub mod lifecycle;
pub mod memory;

pub mod mock;

use std::collections::HashMap;

use async_trait::async_trait;
use carehive_core::{
    models::{
        directory::{CaregiverAssignment, Elder},
        shift::{NewShift, ScheduledShift, ServiceResponse},
    },
    role::UserProfile,
};
use chrono::NaiveDate;
use eyre::Result;

/// Shift persistence and business rules, owned by the scheduling backend.
///
/// Business failures (conflicts, missing records) come back inside
/// [`ServiceResponse`]; an `Err` means the call itself failed.
#[async_trait]
pub trait ShiftService: Send + Sync {
    async fn create_shift(&self, shift: &NewShift) -> Result<ServiceResponse>;

    async fn confirm_shift(&self, shift_id: &str, user_id: &str) -> Result<ServiceResponse>;

    async fn cancel_shift(
        &self,
        shift_id: &str,
        user_id: &str,
        reason: &str,
    ) -> Result<ServiceResponse>;

    /// Shifts of an agency dated within `start..=end`.
    async fn get_scheduled_shifts(
        &self,
        agency_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ScheduledShift>>;
}

/// Read access to agency people: caregivers, care recipients and users.
#[async_trait]
pub trait AgencyDirectory: Send + Sync {
    /// Batch lookup of display names; unknown ids are left out of the map.
    async fn resolve_names(
        &self,
        user_ids: &[String],
        agency_id: &str,
    ) -> Result<HashMap<String, String>>;

    async fn caregiver_assignments(&self, agency_id: &str) -> Result<Vec<CaregiverAssignment>>;

    async fn elders(&self, agency_id: &str) -> Result<Vec<Elder>>;

    async fn user_profile(&self, user_id: &str) -> Result<Option<UserProfile>>;
}
