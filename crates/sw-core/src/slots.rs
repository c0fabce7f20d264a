//! Half-hour slots over the observed period.
//!
//! The observed period runs from midnight of the earliest recorded bedtime to
//! the midnight after the latest wake-up. It is cut into consecutive 30-minute
//! [`Slot`]s and each slot records how much of it was spent asleep.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use rayon::prelude::*;
use thiserror::Error;

use crate::interval::{Interval, covered};
use crate::types::TimeSpan;

/// Length of one slot.
pub const SLOT_LENGTH: TimeDelta = TimeDelta::minutes(30);

/// Number of slots in one calendar day.
pub const SLOTS_PER_DAY: usize = 48;

/// Errors deriving the observed period.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PeriodError {
    /// There were no sessions to derive a period from.
    #[error("no sleep sessions to derive a period from")]
    NoSpans,

    /// The period covers no whole day.
    #[error("observed period {earliest} - {latest} spans {days} days")]
    Degenerate {
        earliest: NaiveDateTime,
        latest: NaiveDateTime,
        days: i64,
    },
}

/// The midnight-aligned range of days covered by the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservedPeriod {
    earliest: NaiveDateTime,
    latest: NaiveDateTime,
}

impl ObservedPeriod {
    /// Creates a period from two midnights, `latest` exclusive.
    ///
    /// Both bounds are truncated to midnight. Fails unless at least one whole
    /// day lies between them.
    pub fn new(earliest: NaiveDateTime, latest: NaiveDateTime) -> Result<Self, PeriodError> {
        let earliest = midnight(earliest.date());
        let latest = midnight(latest.date());
        let days = (latest - earliest).num_days();
        if days <= 0 {
            return Err(PeriodError::Degenerate {
                earliest,
                latest,
                days,
            });
        }
        Ok(Self { earliest, latest })
    }

    /// Derives the period from the bounds of every session.
    ///
    /// The earliest bedtime and latest wake-up are found by scanning all
    /// sessions, so the order of the log does not matter. The day holding the
    /// latest wake-up is always included.
    pub fn from_spans(spans: &[TimeSpan]) -> Result<Self, PeriodError> {
        let earliest = spans.iter().map(|s| s.from()).min();
        let latest = spans.iter().map(|s| s.to()).max();
        let (Some(earliest), Some(latest)) = (earliest, latest) else {
            return Err(PeriodError::NoSpans);
        };
        Self::new(earliest, midnight(latest.date()) + TimeDelta::days(1))
    }

    /// Midnight starting the first observed day.
    pub const fn earliest(&self) -> NaiveDateTime {
        self.earliest
    }

    /// Midnight after the last observed day (exclusive).
    pub const fn latest(&self) -> NaiveDateTime {
        self.latest
    }

    /// First observed day.
    pub fn first_day(&self) -> NaiveDate {
        self.earliest.date()
    }

    /// Last observed day (inclusive).
    pub fn last_day(&self) -> NaiveDate {
        (self.latest - TimeDelta::days(1)).date()
    }

    /// Number of whole days in the period, always positive.
    pub fn number_of_days(&self) -> i64 {
        (self.latest - self.earliest).num_days()
    }

    /// Start of every half-hour slot in the period, in order.
    pub fn slot_starts(&self) -> impl Iterator<Item = NaiveDateTime> + '_ {
        std::iter::successors(Some(self.earliest), |start| {
            start.checked_add_signed(SLOT_LENGTH)
        })
        .take_while(|start| *start < self.latest)
    }
}

/// One half-hour window within the observed period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    start: NaiveDateTime,
}

impl Slot {
    /// Creates the slot beginning at `start`.
    pub const fn starting_at(start: NaiveDateTime) -> Self {
        Self { start }
    }
}

impl Interval for Slot {
    fn start(&self) -> NaiveDateTime {
        self.start
    }

    fn end(&self) -> NaiveDateTime {
        self.start + SLOT_LENGTH
    }
}

/// Time spent asleep within one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotCoverage {
    pub slot: Slot,
    /// Between zero and [`SLOT_LENGTH`].
    pub duration: TimeDelta,
}

impl SlotCoverage {
    /// Coverage as a fraction of the slot, in `[0, 1]`.
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> f64 {
        self.duration.num_milliseconds() as f64 / SLOT_LENGTH.num_milliseconds() as f64
    }
}

/// Computes sleep coverage for every slot of the period, in chronological order.
///
/// Slots are independent, so they are scanned in parallel; the collected order
/// is the slot order regardless of scheduling.
pub fn build_slots(period: &ObservedPeriod, spans: &[TimeSpan]) -> Vec<SlotCoverage> {
    let starts: Vec<NaiveDateTime> = period.slot_starts().collect();
    let coverage: Vec<SlotCoverage> = starts
        .into_par_iter()
        .map(|start| {
            let slot = Slot::starting_at(start);
            SlotCoverage {
                slot,
                duration: covered(&slot, spans),
            }
        })
        .collect();

    tracing::debug!(
        slots = coverage.len(),
        spans = spans.len(),
        "built slot coverage"
    );
    coverage
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}
