//! Report windows and summary statistics over dated records.
//!
//! The aggregation functions are pure: the caller fetches the rows for a
//! student (already authorized) and passes them in with the window. Rows
//! outside the window are ignored, so callers may pass a superset.

use std::collections::HashSet;

use serde::Serialize;

use crate::attendance::AttendanceStatus;
use crate::dates::days_inclusive;
use crate::error::CoreError;
use crate::types::{Date, DbId};

// ---------------------------------------------------------------------------
// Window
// ---------------------------------------------------------------------------

/// A student-scoped, inclusive date range.
///
/// Construction rejects `end < start`, so every value of this type is a
/// well-formed window of at least one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportWindow {
    student_id: DbId,
    start: Date,
    end: Date,
}

impl ReportWindow {
    pub fn new(student_id: DbId, start: Date, end: Date) -> Result<Self, CoreError> {
        if end < start {
            return Err(CoreError::Validation(format!(
                "Report end date {end} is before start date {start}"
            )));
        }
        Ok(Self {
            student_id,
            start,
            end,
        })
    }

    pub fn student_id(&self) -> DbId {
        self.student_id
    }

    pub fn start(&self) -> Date {
        self.start
    }

    pub fn end(&self) -> Date {
        self.end
    }

    /// Whether `date` falls inside the window (both ends inclusive).
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days covered, counting both ends.
    pub fn duration_days(&self) -> i64 {
        days_inclusive(self.start, self.end)
    }
}

// ---------------------------------------------------------------------------
// Dated records
// ---------------------------------------------------------------------------

/// Anything that carries a calendar date.
pub trait Dated {
    fn date(&self) -> Date;
}

impl Dated for Date {
    fn date(&self) -> Date {
        *self
    }
}

impl<T> Dated for (Date, T) {
    fn date(&self) -> Date {
        self.0
    }
}

impl<T: Dated + ?Sized> Dated for &T {
    fn date(&self) -> Date {
        (**self).date()
    }
}

/// Format a ratio with two decimals for display.
fn two_decimals(value: f64) -> String {
    format!("{value:.2}")
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Count-based statistics for the records inside a window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_count: i64,
    pub duration_days: i64,
    pub distinct_days: i64,
    pub average_per_day: f64,
    /// `average_per_day` rendered with two decimals.
    pub average_per_day_display: String,
}

/// Summarize the records of `records` that fall inside `window`.
pub fn summarize<I>(records: I, window: &ReportWindow) -> Summary
where
    I: IntoIterator,
    I::Item: Dated,
{
    let mut total_count: i64 = 0;
    let mut days = HashSet::new();

    for date in records.into_iter().map(|r| r.date()) {
        if window.contains(date) {
            total_count += 1;
            days.insert(date);
        }
    }

    let duration_days = window.duration_days();
    let average_per_day = if duration_days > 0 {
        total_count as f64 / duration_days as f64
    } else {
        0.0
    };

    Summary {
        total_count,
        duration_days,
        distinct_days: days.len() as i64,
        average_per_day,
        average_per_day_display: two_decimals(average_per_day),
    }
}

// ---------------------------------------------------------------------------
// Attendance breakdown
// ---------------------------------------------------------------------------

/// Per-status attendance counts inside a window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceBreakdown {
    pub present: i64,
    pub absent: i64,
    pub justified_absent: i64,
    /// `present / (present + absent + justified_absent)`, zero when empty.
    pub attendance_rate: f64,
    pub attendance_rate_display: String,
}

impl AttendanceBreakdown {
    /// Tally `(date, status)` pairs that fall inside `window`.
    pub fn tally<I>(records: I, window: &ReportWindow) -> Self
    where
        I: IntoIterator<Item = (Date, AttendanceStatus)>,
    {
        let (mut present, mut absent, mut justified_absent) = (0_i64, 0_i64, 0_i64);

        for (date, status) in records {
            if !window.contains(date) {
                continue;
            }
            match status {
                AttendanceStatus::Present => present += 1,
                AttendanceStatus::Absent => absent += 1,
                AttendanceStatus::JustifiedAbsent => justified_absent += 1,
            }
        }

        let total = present + absent + justified_absent;
        let attendance_rate = if total > 0 {
            present as f64 / total as f64
        } else {
            0.0
        };

        Self {
            present,
            absent,
            justified_absent,
            attendance_rate,
            attendance_rate_display: two_decimals(attendance_rate),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
