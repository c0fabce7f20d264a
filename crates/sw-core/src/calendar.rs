//! Per-day sleep bars.
//!
//! Walks the observed period one calendar day at a time, newest first, and
//! quantizes each day's half-hour slots into a single row of levels.

use chrono::{Datelike, NaiveDate, NaiveTime, TimeDelta};

use crate::interval::Interval;
use crate::quantize::daily_level;
use crate::slots::{ObservedPeriod, SlotCoverage};

/// One calendar day rendered as a bar of levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBar {
    pub date: NaiveDate,
    /// One level per half hour, starting at midnight.
    pub levels: Vec<u8>,
    /// Sleep recorded within the day.
    pub total: TimeDelta,
    /// First day walked in its month; a month heading precedes it.
    pub opens_month: bool,
    /// Last day of a section: the first of a month or the earliest observed day.
    pub closes_section: bool,
}

/// Builds one bar per observed day, newest day first.
///
/// `slots` must be in chronological order, as produced by
/// [`build_slots`](crate::slots::build_slots).
pub fn walk_calendar(period: &ObservedPeriod, slots: &[SlotCoverage], levels: u8) -> Vec<DayBar> {
    let first_day = period.first_day();
    let mut bars = Vec::new();
    let mut current_month = None;

    let days = std::iter::successors(Some(period.last_day()), NaiveDate::pred_opt)
        .take_while(|d| *d >= first_day);
    for date in days {
        let day_start = date.and_time(NaiveTime::MIN);
        let day_end = day_start + TimeDelta::days(1);
        let lo = slots.partition_point(|s| s.slot.start() < day_start);
        let hi = slots.partition_point(|s| s.slot.start() < day_end);
        let day_slots = &slots[lo..hi];

        let month = (date.year(), date.month());
        let opens_month = current_month != Some(month);
        current_month = Some(month);

        bars.push(DayBar {
            date,
            levels: day_slots
                .iter()
                .map(|s| daily_level(s.fraction(), levels))
                .collect(),
            total: day_slots
                .iter()
                .fold(TimeDelta::zero(), |acc, s| acc + s.duration),
            opens_month,
            closes_section: date.day() == 1 || date <= first_day,
        });
    }

    bars
}
