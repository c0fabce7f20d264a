//! Report assembly.
//!
//! [`SleepReport::build`] runs the whole pipeline on a set of sessions:
//! observed period, slot coverage, time-of-day profile, histogram rows and
//! daily bars. Everything is recomputed from the sessions on every call.

use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar::{DayBar, walk_calendar};
use crate::profile::TimeOfDayProfile;
use crate::quantize::Histogram;
use crate::slots::{ObservedPeriod, PeriodError, build_slots};
use crate::types::TimeSpan;

/// Errors that prevent a report from being built.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// No sessions were given; distinct from sessions that add up to no sleep.
    #[error("no parsable sleep data")]
    NoData,

    /// The observed period covers no whole day.
    #[error("degenerate observed period")]
    DegeneratePeriod(#[source] PeriodError),
}

impl From<PeriodError> for ReportError {
    fn from(err: PeriodError) -> Self {
        match err {
            PeriodError::NoSpans => Self::NoData,
            err @ PeriodError::Degenerate { .. } => Self::DegeneratePeriod(err),
        }
    }
}

/// Quantization settings for a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    /// Levels per histogram row.
    pub histogram_levels: u8,
    /// Number of stacked histogram rows.
    pub histogram_rows: u8,
    /// Levels per daily-bar cell.
    pub bar_levels: u8,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            histogram_levels: 8,
            histogram_rows: 4,
            // One short of full so adjacent day bars stay visually separate
            bar_levels: 7,
        }
    }
}

/// Everything a renderer needs to draw a sleep report.
#[derive(Debug, Clone, PartialEq)]
pub struct SleepReport {
    pub period: ObservedPeriod,
    pub profile: TimeOfDayProfile,
    pub histogram: Histogram,
    /// Newest day first.
    pub days: Vec<DayBar>,
}

impl SleepReport {
    /// Builds a report from the given sessions.
    pub fn build(spans: &[TimeSpan], options: &ReportOptions) -> Result<Self, ReportError> {
        if spans.is_empty() {
            return Err(ReportError::NoData);
        }

        let period = ObservedPeriod::from_spans(spans)?;
        tracing::debug!(
            earliest = %period.earliest(),
            latest = %period.latest(),
            days = period.number_of_days(),
            "derived observed period"
        );

        let slots = build_slots(&period, spans);
        if slots.is_empty() {
            return Err(ReportError::NoData);
        }

        let profile = TimeOfDayProfile::aggregate(&period, &slots);
        let histogram = Histogram::build(
            &profile,
            options.histogram_levels,
            options.histogram_rows,
        );
        let days = walk_calendar(&period, &slots, options.bar_levels);

        Ok(Self {
            period,
            profile,
            histogram,
            days,
        })
    }

    /// Total sleep over the whole period.
    pub const fn total_time(&self) -> TimeDelta {
        self.profile.total_time()
    }

    /// Number of observed days.
    pub fn number_of_days(&self) -> i64 {
        self.period.number_of_days()
    }

    /// Average sleep per observed day.
    pub fn daily_average(&self) -> TimeDelta {
        let days = i32::try_from(self.number_of_days()).unwrap_or(i32::MAX);
        self.total_time() / days
    }

    /// First observed day.
    pub fn first_day(&self) -> NaiveDate {
        self.period.first_day()
    }

    /// Last observed day (inclusive).
    pub fn last_day(&self) -> NaiveDate {
        self.period.last_day()
    }
}
