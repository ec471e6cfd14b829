//! Create, confirm, cancel and copy actions on a single shift.
//!
//! Cancelling takes two steps: [`ShiftActions::request_cancel`] hands out a
//! [`PendingCancellation`], and only confirming that token sends the cancel
//! call. Copying creates an independent shift; the original is never touched.

use carehive_core::{
    errors::{ScheduleError, ScheduleResult},
    models::{
        directory::{Caregiver, Elder},
        shift::{NewShift, ScheduledShift},
    },
    time::validate_time_range,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{bulk::require_selection, context::SchedulerContext, ShiftService};

/// Reason attached to every cancellation issued from the schedule.
pub const CANCEL_REASON: &str = "Cancelled by agency";

/// Input of the single shift dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftDraft {
    pub date: NaiveDate,
    pub caregiver: Option<Caregiver>,
    pub elder: Option<Elder>,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Actions the detail view offers for a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableActions {
    pub confirm: bool,
    pub cancel: bool,
    pub copy: bool,
}

pub fn available_actions(shift: &ScheduledShift) -> AvailableActions {
    AvailableActions {
        confirm: shift.can_confirm(),
        cancel: shift.can_modify(),
        copy: true,
    }
}

pub struct ShiftActions<'a, S: ?Sized> {
    service: &'a S,
    ctx: &'a SchedulerContext,
}

impl<'a, S> ShiftActions<'a, S>
where
    S: ShiftService + ?Sized,
{
    pub fn new(service: &'a S, ctx: &'a SchedulerContext) -> Self {
        Self { service, ctx }
    }

    /// Validates the draft and creates one shift. Returns the new shift id
    /// when the service reports one.
    pub async fn create(&self, draft: &ShiftDraft, today: NaiveDate) -> ScheduleResult<Option<String>> {
        let (caregiver, elder) = require_selection(draft.caregiver.as_ref(), draft.elder.as_ref())?;
        validate_time_range(&draft.start_time, &draft.end_time)?;
        if draft.date < today {
            return Err(ScheduleError::Validation(
                "Cannot schedule shifts in the past".to_string(),
            ));
        }

        let shift = NewShift {
            agency_id: self.ctx.agency_id.clone(),
            group_id: elder.group_id.clone(),
            elder_id: elder.id.clone(),
            elder_name: elder.name.clone(),
            caregiver_id: caregiver.id.clone(),
            caregiver_name: caregiver.name.clone(),
            date: draft.date,
            start_time: draft.start_time.clone(),
            end_time: draft.end_time.clone(),
            notes: draft.notes.clone(),
            user_id: self.ctx.user_id.clone(),
            is_recurring: false,
        };

        let new_id = self.service.create_shift(&shift).await?.into_result()?;
        info!(
            "Shift created for caregiver {} on {} by {}",
            caregiver.id, draft.date, self.ctx.user_id
        );
        Ok(new_id)
    }

    pub async fn confirm(&self, shift: &ScheduledShift) -> ScheduleResult<()> {
        if !shift.can_confirm() {
            return Err(ScheduleError::Validation(
                "Only scheduled shifts can be confirmed".to_string(),
            ));
        }

        self.service
            .confirm_shift(&shift.id, &self.ctx.user_id)
            .await?
            .into_result()?;

        info!("Shift {} confirmed by {}", shift.id, self.ctx.user_id);
        Ok(())
    }

    /// First step of a cancellation. Nothing is sent yet.
    pub fn request_cancel<'s>(
        &'s self,
        shift: &'s ScheduledShift,
    ) -> ScheduleResult<PendingCancellation<'s, S>> {
        if !shift.can_modify() {
            return Err(ScheduleError::Validation(
                "Only scheduled or confirmed shifts can be cancelled".to_string(),
            ));
        }

        Ok(PendingCancellation {
            service: self.service,
            ctx: self.ctx,
            shift,
        })
    }

    /// Creates a new shift on `target` with the same caregiver, care
    /// recipient, times and notes. Returns the new shift id when the service
    /// reports one.
    pub async fn copy_to_date(
        &self,
        shift: &ScheduledShift,
        target: NaiveDate,
        today: NaiveDate,
    ) -> ScheduleResult<Option<String>> {
        if target < today {
            return Err(ScheduleError::Validation(
                "Cannot copy a shift to a past date".to_string(),
            ));
        }

        let copy = NewShift {
            agency_id: shift.agency_id.clone(),
            group_id: shift.group_id.clone(),
            elder_id: shift.elder_id.clone(),
            elder_name: shift.elder_name.clone(),
            caregiver_id: shift.caregiver_id.clone(),
            caregiver_name: shift.caregiver_name.clone(),
            date: target,
            start_time: shift.start_time.clone(),
            end_time: shift.end_time.clone(),
            notes: shift.notes.clone(),
            user_id: self.ctx.user_id.clone(),
            is_recurring: false,
        };

        let new_id = self.service.create_shift(&copy).await?.into_result()?;
        info!("Shift {} copied to {}", shift.id, target);
        Ok(new_id)
    }
}

/// A cancellation waiting for the user's second confirmation.
///
/// Dropping it, or calling [`PendingCancellation::abort`], sends nothing.
#[must_use = "a cancellation is only sent once confirmed"]
pub struct PendingCancellation<'a, S: ?Sized> {
    service: &'a S,
    ctx: &'a SchedulerContext,
    shift: &'a ScheduledShift,
}

impl<'a, S> PendingCancellation<'a, S>
where
    S: ShiftService + ?Sized,
{
    pub fn shift(&self) -> &ScheduledShift {
        self.shift
    }

    pub async fn confirm(self) -> ScheduleResult<()> {
        self.service
            .cancel_shift(&self.shift.id, &self.ctx.user_id, CANCEL_REASON)
            .await?
            .into_result()?;

        info!("Shift {} cancelled by {}", self.shift.id, self.ctx.user_id);
        Ok(())
    }

    pub fn abort(self) {}
}
