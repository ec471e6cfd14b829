//! Shift times are local wall-clock strings in zero-padded 24 hour `"HH:MM"`
//! form. In that form lexicographic order equals chronological order, so
//! range checks compare the strings directly once the format is validated.

use chrono::NaiveTime;

use crate::errors::{ScheduleError, ScheduleResult};

const TIME_FORMAT: &str = "%H:%M";

/// Parses a `"HH:MM"` string, rejecting anything that is not zero-padded.
pub fn parse_time(value: &str) -> ScheduleResult<NaiveTime> {
    if value.len() != 5 {
        return Err(ScheduleError::Validation(format!(
            "Time must be in HH:MM format: {value}"
        )));
    }

    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .map_err(|_| ScheduleError::Validation(format!("Time must be in HH:MM format: {value}")))
}

/// Checks both times and that the end is strictly after the start.
pub fn validate_time_range(start: &str, end: &str) -> ScheduleResult<()> {
    parse_time(start)?;
    parse_time(end)?;

    if start >= end {
        return Err(ScheduleError::Validation(
            "End time must be after start time".to_string(),
        ));
    }

    Ok(())
}

/// Duration in minutes of a validated time range.
pub fn duration_minutes(start: &str, end: &str) -> ScheduleResult<i64> {
    validate_time_range(start, end)?;
    let start = parse_time(start)?;
    let end = parse_time(end)?;

    Ok((end - start).num_minutes())
}
