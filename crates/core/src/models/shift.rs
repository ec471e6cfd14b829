use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ScheduleError, ScheduleResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftStatus {
    Scheduled,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

impl ShiftStatus {
    /// Shifts that have not started yet can still be cancelled or changed.
    pub fn can_modify(self) -> bool {
        matches!(self, ShiftStatus::Scheduled | ShiftStatus::Confirmed)
    }

    pub fn can_confirm(self) -> bool {
        self == ShiftStatus::Scheduled
    }
}

/// One caregiver placed with one care recipient for a time range on a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledShift {
    pub id: String,
    pub agency_id: String,
    pub group_id: String,
    pub elder_id: String,
    pub elder_name: String,
    pub caregiver_id: String,
    pub caregiver_name: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    /// Minutes between start and end
    pub duration: i64,
    pub status: ShiftStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
    pub created_at: DateTime<Utc>,
}

impl ScheduledShift {
    pub fn hours(&self) -> f64 {
        self.duration as f64 / 60.0
    }

    pub fn can_modify(&self) -> bool {
        self.status.can_modify()
    }

    pub fn can_confirm(&self) -> bool {
        self.status.can_confirm()
    }
}

/// Arguments of a shift creation call against the scheduling service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShift {
    pub agency_id: String,
    pub group_id: String,
    pub elder_id: String,
    pub elder_name: String,
    pub caregiver_id: String,
    pub caregiver_name: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Acting user
    pub user_id: String,
    #[serde(default)]
    pub is_recurring: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftConflict {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflicting_shift_id: Option<String>,
}

/// Reply of the mutating scheduling calls (create, confirm, cancel).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflict: Option<ShiftConflict>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_id: Option<String>,
}

impl ServiceResponse {
    pub fn ok(shift_id: Option<String>) -> Self {
        Self {
            success: true,
            shift_id,
            ..Self::default()
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn conflicted(conflict: ShiftConflict) -> Self {
        Self {
            success: false,
            error: Some(conflict.message.clone()),
            conflict: Some(conflict),
            shift_id: None,
        }
    }

    /// Turns the reply into a result carrying the created shift id, if any.
    ///
    /// A conflict message wins over the generic error field.
    pub fn into_result(self) -> ScheduleResult<Option<String>> {
        if self.success {
            return Ok(self.shift_id);
        }

        if let Some(conflict) = self.conflict {
            return Err(ScheduleError::Conflict(conflict.message));
        }

        match self.error {
            Some(error) if !error.trim().is_empty() => Err(ScheduleError::Service(error)),
            _ => Err(ScheduleError::Service("Unknown error".to_string())),
        }
    }
}
