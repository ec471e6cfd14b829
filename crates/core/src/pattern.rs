//! # Date selection
//!
//! Dates for bulk shift creation are picked one at a time or through
//! pattern shortcuts ("all weekdays this month"). A pattern button behaves
//! as an asymmetric toggle: when every matching date is already selected the
//! click removes them all, otherwise it only adds the missing ones. Clicking
//! the same pattern twice on an untouched selection therefore restores it.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::errors::ScheduleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePattern {
    Weekdays,
    Weekends,
    Day(Weekday),
}

impl DatePattern {
    /// Weekday indices with Sunday as 0.
    pub fn weekday_indices(&self) -> Vec<u32> {
        match self {
            DatePattern::Weekdays => vec![1, 2, 3, 4, 5],
            DatePattern::Weekends => vec![0, 6],
            DatePattern::Day(day) => vec![day.num_days_from_sunday()],
        }
    }

    pub fn matches(&self, date: NaiveDate) -> bool {
        self.weekday_indices()
            .contains(&date.weekday().num_days_from_sunday())
    }

    pub fn tag(&self) -> &'static str {
        match self {
            DatePattern::Weekdays => "weekdays",
            DatePattern::Weekends => "weekends",
            DatePattern::Day(Weekday::Sun) => "sunday",
            DatePattern::Day(Weekday::Mon) => "monday",
            DatePattern::Day(Weekday::Tue) => "tuesday",
            DatePattern::Day(Weekday::Wed) => "wednesday",
            DatePattern::Day(Weekday::Thu) => "thursday",
            DatePattern::Day(Weekday::Fri) => "friday",
            DatePattern::Day(Weekday::Sat) => "saturday",
        }
    }
}

impl fmt::Display for DatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for DatePattern {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        match tag.as_str() {
            "weekdays" => Ok(DatePattern::Weekdays),
            "weekends" => Ok(DatePattern::Weekends),
            other => other
                .parse::<Weekday>()
                .map(DatePattern::Day)
                .map_err(|_| ScheduleError::Validation(format!("Unknown date pattern: {s}"))),
        }
    }
}

impl Serialize for DatePattern {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for DatePattern {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        tag.parse().map_err(serde::de::Error::custom)
    }
}

/// Dates of `month`'s calendar month that match `pattern` and are not
/// before `today`, in ascending order.
pub fn matching_dates(pattern: DatePattern, month: NaiveDate, today: NaiveDate) -> Vec<NaiveDate> {
    calendar::month_range(month)
        .days()
        .filter(|day| *day >= today)
        .filter(|day| pattern.matches(*day))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "count", rename_all = "lowercase")]
pub enum PatternOutcome {
    Added(usize),
    Removed(usize),
    Unchanged,
}

/// Dates picked for bulk creation. Never holds a date before the `today`
/// passed to the mutating calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateSelection {
    dates: BTreeSet<NaiveDate>,
}

impl DateSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a selection sent back by a client, dropping past dates.
    pub fn from_dates(dates: impl IntoIterator<Item = NaiveDate>, today: NaiveDate) -> Self {
        Self {
            dates: dates.into_iter().filter(|date| *date >= today).collect(),
        }
    }

    /// Flips a single date. Past dates are refused and `false` is returned.
    pub fn toggle(&mut self, date: NaiveDate, today: NaiveDate) -> bool {
        if date < today {
            return false;
        }

        if !self.dates.remove(&date) {
            self.dates.insert(date);
        }
        true
    }

    pub fn apply_pattern(
        &mut self,
        pattern: DatePattern,
        month: NaiveDate,
        today: NaiveDate,
    ) -> PatternOutcome {
        let matching = matching_dates(pattern, month, today);
        if matching.is_empty() {
            return PatternOutcome::Unchanged;
        }

        if matching.iter().all(|date| self.dates.contains(date)) {
            for date in &matching {
                self.dates.remove(date);
            }
            return PatternOutcome::Removed(matching.len());
        }

        let added = matching
            .into_iter()
            .filter(|date| self.dates.insert(*date))
            .count();
        PatternOutcome::Added(added)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn clear(&mut self) {
        self.dates.clear();
    }

    /// Selected dates in ascending order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.dates.iter().copied().collect()
    }
}
