//! # Bulk shift creation
//!
//! One caregiver, one care recipient and one time range are scheduled on a
//! list of dates. Dates are created strictly one after another so progress
//! is deterministic and every failure belongs to a single date:
//!
//! 1. Validate the request; nothing is sent when validation fails
//! 2. Queue the dates in ascending order
//! 3. For each date, await one creation call and record its outcome
//! 4. Report progress to the observer after every date
//! 5. Partition the results; fire the completion hook if anything succeeded
//!
//! Earlier successes are never rolled back and failed dates are never
//! retried automatically. Re-submitting the failed dates is up to the caller.

use std::collections::VecDeque;

use carehive_core::{
    errors::{ScheduleError, ScheduleResult},
    models::{
        directory::{Caregiver, Elder},
        shift::NewShift,
    },
    time::validate_time_range,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{context::SchedulerContext, ShiftService};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkShiftRequest {
    pub dates: Vec<NaiveDate>,
    pub caregiver: Option<Caregiver>,
    pub elder: Option<Elder>,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Result of the creation call for one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateOutcome {
    pub date: NaiveDate,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BulkProgress<'a> {
    pub completed: usize,
    pub total: usize,
    /// `completed / total * 100`, rounded
    pub percent: u8,
    pub outcome: &'a DateOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedDate {
    pub date: NaiveDate,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkOutcome {
    pub total: usize,
    pub succeeded: Vec<NaiveDate>,
    pub failed: Vec<FailedDate>,
}

impl BulkOutcome {
    pub fn success_count(&self) -> usize {
        self.succeeded.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failed.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Receives progress while a batch runs.
pub trait BulkObserver {
    fn on_progress(&mut self, _progress: &BulkProgress<'_>) {}

    /// Called once after the batch, only when at least one date succeeded.
    fn on_complete(&mut self, _outcome: &BulkOutcome) {}
}

impl BulkObserver for () {}

/// Pending dates of a batch and the outcomes recorded so far.
#[derive(Debug)]
pub struct BulkQueue {
    pending: VecDeque<NaiveDate>,
    total: usize,
    results: Vec<DateOutcome>,
}

impl BulkQueue {
    /// Queues `dates` in ascending order, dropping duplicates.
    pub fn new(mut dates: Vec<NaiveDate>) -> Self {
        dates.sort_unstable();
        dates.dedup();

        Self {
            total: dates.len(),
            pending: dates.into(),
            results: Vec::new(),
        }
    }

    pub fn next_date(&mut self) -> Option<NaiveDate> {
        self.pending.pop_front()
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn completed(&self) -> usize {
        self.results.len()
    }

    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((self.completed() as f64 / self.total as f64) * 100.0).round() as u8
    }

    pub fn record(&mut self, outcome: DateOutcome) -> BulkProgress<'_> {
        self.results.push(outcome);
        let percent = self.percent();
        let completed = self.completed();

        BulkProgress {
            completed,
            total: self.total,
            percent,
            outcome: &self.results[completed - 1],
        }
    }

    pub fn finish(self) -> BulkOutcome {
        let mut outcome = BulkOutcome {
            total: self.total,
            ..BulkOutcome::default()
        };

        for result in self.results {
            if result.success {
                outcome.succeeded.push(result.date);
            } else {
                outcome.failed.push(FailedDate {
                    date: result.date,
                    error: result.error.unwrap_or_else(|| "Unknown error".to_string()),
                });
            }
        }

        outcome
    }
}

/// Returns the chosen caregiver and care recipient. A blank id counts as
/// nothing selected.
pub(crate) fn require_selection<'r>(
    caregiver: Option<&'r Caregiver>,
    elder: Option<&'r Elder>,
) -> ScheduleResult<(&'r Caregiver, &'r Elder)> {
    let caregiver = caregiver
        .filter(|caregiver| !caregiver.id.trim().is_empty())
        .ok_or_else(|| ScheduleError::Validation("Please select a caregiver".to_string()))?;
    let elder = elder
        .filter(|elder| !elder.id.trim().is_empty())
        .ok_or_else(|| ScheduleError::Validation("Please select a care recipient".to_string()))?;

    Ok((caregiver, elder))
}

/// Checks a bulk request before anything is sent and returns the chosen
/// caregiver and care recipient.
pub fn validate_request(
    request: &BulkShiftRequest,
    today: NaiveDate,
) -> ScheduleResult<(&Caregiver, &Elder)> {
    let (caregiver, elder) = require_selection(request.caregiver.as_ref(), request.elder.as_ref())?;
    if request.dates.is_empty() {
        return Err(ScheduleError::Validation("Please select at least one date".to_string()));
    }

    validate_time_range(&request.start_time, &request.end_time)?;

    if let Some(past) = request.dates.iter().find(|date| **date < today) {
        return Err(ScheduleError::Validation(format!(
            "Cannot schedule shifts in the past: {}",
            past
        )));
    }

    Ok((caregiver, elder))
}

pub struct BulkShiftCreator<'a, S: ?Sized> {
    service: &'a S,
}

impl<'a, S> BulkShiftCreator<'a, S>
where
    S: ShiftService + ?Sized,
{
    pub fn new(service: &'a S) -> Self {
        Self { service }
    }

    /// Runs the whole batch to completion.
    ///
    /// Only validation failures return `Err`; per-date failures are reported
    /// in the returned [`BulkOutcome`].
    pub async fn run<O>(
        &self,
        ctx: &SchedulerContext,
        request: &BulkShiftRequest,
        today: NaiveDate,
        observer: &mut O,
    ) -> ScheduleResult<BulkOutcome>
    where
        O: BulkObserver + Send + ?Sized,
    {
        let (caregiver, elder) = validate_request(request, today)?;

        let mut queue = BulkQueue::new(request.dates.clone());
        info!(
            "Creating {} shifts for caregiver {} with elder {} in agency {}",
            queue.total(),
            caregiver.id,
            elder.id,
            ctx.agency_id
        );

        while let Some(date) = queue.next_date() {
            let shift = NewShift {
                agency_id: ctx.agency_id.clone(),
                group_id: elder.group_id.clone(),
                elder_id: elder.id.clone(),
                elder_name: elder.name.clone(),
                caregiver_id: caregiver.id.clone(),
                caregiver_name: caregiver.name.clone(),
                date,
                start_time: request.start_time.clone(),
                end_time: request.end_time.clone(),
                notes: request.notes.clone(),
                user_id: ctx.user_id.clone(),
                is_recurring: false,
            };

            debug!("Creating shift on {}", date);
            let result = match self.service.create_shift(&shift).await {
                Ok(response) => response.into_result(),
                Err(e) => Err(ScheduleError::Transport(e)),
            };

            let outcome = match result {
                Ok(shift_id) => DateOutcome {
                    date,
                    success: true,
                    shift_id,
                    error: None,
                },
                Err(e) => {
                    warn!("Shift creation failed on {}: {}", date, e);
                    DateOutcome {
                        date,
                        success: false,
                        shift_id: None,
                        error: Some(e.user_message()),
                    }
                }
            };

            let progress = queue.record(outcome);
            observer.on_progress(&progress);
        }

        let outcome = queue.finish();
        info!(
            "Bulk creation finished: {} created, {} failed",
            outcome.success_count(),
            outcome.failure_count()
        );

        if outcome.success_count() > 0 {
            observer.on_complete(&outcome);
        }

        Ok(outcome)
    }
}
