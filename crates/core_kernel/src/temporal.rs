//! Billing period types
//!
//! Bills are keyed by calendar month. `BillingMonth` wraps the
//! first-of-month date so that "the bill for March 2026" has exactly one
//! canonical representation, and gives the period arithmetic the
//! carry-forward resolver needs (previous month) and the orchestrator
//! needs (due date in the following month).
//!
//! The engine never reads a wall clock: callers pass the instant an
//! operation happens and this module turns it into a period.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Day of the following month on which a bill falls due
const DUE_DAY: u32 = 5;

/// Errors from billing period construction
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid calendar month: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },
}

/// A calendar-month billing period, canonically the first day of the month
///
/// Ordering is chronological, so `BillingMonth` works directly as a map
/// key and in range scans.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BillingMonth(NaiveDate);

impl BillingMonth {
    /// Creates a billing month from a year and 1-based month number
    pub fn new(year: i32, month: u32) -> Result<Self, TemporalError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self)
            .ok_or(TemporalError::InvalidMonth { year, month })
    }

    /// Returns the billing month containing the given date
    pub fn containing(date: NaiveDate) -> Self {
        // The first of the month always exists
        Self(
            NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
                .expect("first of month is always a valid date"),
        )
    }

    /// Returns the first day of the period
    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    /// Returns the year
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the 1-based month number
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the immediately preceding calendar month
    pub fn previous(&self) -> Self {
        let (year, month) = if self.0.month() == 1 {
            (self.0.year() - 1, 12)
        } else {
            (self.0.year(), self.0.month() - 1)
        };
        Self(
            NaiveDate::from_ymd_opt(year, month, 1)
                .expect("first of month is always a valid date"),
        )
    }

    /// Returns the immediately following calendar month
    pub fn next(&self) -> Self {
        let (year, month) = if self.0.month() == 12 {
            (self.0.year() + 1, 1)
        } else {
            (self.0.year(), self.0.month() + 1)
        };
        Self(
            NaiveDate::from_ymd_opt(year, month, 1)
                .expect("first of month is always a valid date"),
        )
    }

    /// Returns the due date for this period's bill: the 5th of the
    /// following month
    pub fn due_date(&self) -> NaiveDate {
        let next = self.next();
        NaiveDate::from_ymd_opt(next.year(), next.month(), DUE_DAY)
            .expect("day 5 exists in every month")
    }

    /// Returns true if the given date falls inside this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.0.year() && date.month() == self.0.month()
    }
}

impl From<NaiveDate> for BillingMonth {
    fn from(date: NaiveDate) -> Self {
        Self::containing(date)
    }
}

impl fmt::Display for BillingMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m"))
    }
}
