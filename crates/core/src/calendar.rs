//! # Calendar windows
//!
//! The scheduler shows either one week (Sunday through Saturday) or one
//! calendar month. Everything here is a pure function of the view mode and a
//! reference date.

use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{ScheduleError, ScheduleResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Week,
    Month,
}

impl FromStr for ViewMode {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(ViewMode::Week),
            "month" => Ok(ViewMode::Month),
            other => Err(ScheduleError::Validation(format!("Unknown view mode: {other}"))),
        }
    }
}

/// Inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn len_days(&self) -> u64 {
        (self.end - self.start).num_days() as u64 + 1
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }
}

fn out_of_range(reference: NaiveDate) -> ScheduleError {
    ScheduleError::Validation(format!("Date out of range: {reference}"))
}

/// Sunday on or before `reference`.
pub fn week_start(reference: NaiveDate) -> ScheduleResult<NaiveDate> {
    let offset = reference.weekday().num_days_from_sunday() as u64;
    reference
        .checked_sub_days(Days::new(offset))
        .ok_or_else(|| out_of_range(reference))
}

pub fn month_start(reference: NaiveDate) -> NaiveDate {
    reference.with_day(1).unwrap_or(reference)
}

pub fn month_end(reference: NaiveDate) -> NaiveDate {
    // Only the last representable month has no successor
    month_start(reference)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// The calendar month containing `reference`. Defined for every date.
pub fn month_range(reference: NaiveDate) -> DateRange {
    DateRange {
        start: month_start(reference),
        end: month_end(reference),
    }
}

/// Boundaries of the week or month that contains `reference`.
///
/// Fails only for weeks reaching past the first or last representable date.
pub fn date_range(view: ViewMode, reference: NaiveDate) -> ScheduleResult<DateRange> {
    match view {
        ViewMode::Week => {
            let start = week_start(reference)?;
            let end = start
                .checked_add_days(Days::new(6))
                .ok_or_else(|| out_of_range(reference))?;
            Ok(DateRange { start, end })
        }
        ViewMode::Month => Ok(month_range(reference)),
    }
}

/// Moves the reference date by `delta` periods (previous/next buttons).
///
/// Month steps keep the day of month where possible and clamp to the last
/// day of shorter months.
pub fn step(view: ViewMode, reference: NaiveDate, delta: i32) -> ScheduleResult<NaiveDate> {
    let moved = match view {
        ViewMode::Week => {
            let days = Days::new(7 * delta.unsigned_abs() as u64);
            if delta >= 0 {
                reference.checked_add_days(days)
            } else {
                reference.checked_sub_days(days)
            }
        }
        ViewMode::Month => {
            let months = Months::new(delta.unsigned_abs());
            if delta >= 0 {
                reference.checked_add_months(months)
            } else {
                reference.checked_sub_months(months)
            }
        }
    };

    moved.ok_or_else(|| out_of_range(reference))
}
