//! Time-of-day aggregation.
//!
//! Folds every slot of the observed period onto a single 24-hour axis of
//! [`BUCKET_COUNT`] half-hour buckets, discarding the date. Averaging a bucket
//! over the number of observed days gives the fraction of that half hour
//! typically spent asleep.

use chrono::{NaiveTime, TimeDelta, Timelike};

use crate::interval::Interval;
use crate::slots::{ObservedPeriod, SLOT_LENGTH, SLOTS_PER_DAY, SlotCoverage};

/// Number of half-hour-of-day buckets.
pub const BUCKET_COUNT: usize = SLOTS_PER_DAY;

/// Every this many buckets (six hours) a bucket is drawn as a gridline.
pub const GRID_INTERVAL: usize = 12;

/// Returns the bucket a time of day falls into.
pub fn bucket_index(time: NaiveTime) -> usize {
    time.hour() as usize * 2 + usize::from(time.minute() >= 30)
}

/// Returns whether a bucket marks 0:00, 6:00, 12:00 or 18:00.
pub const fn is_grid_bucket(index: usize) -> bool {
    index % GRID_INTERVAL == 0
}

/// One half-hour-of-day bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeOfDayBucket {
    /// Position on the 24-hour axis, `0..BUCKET_COUNT`.
    pub index: usize,
    /// Sleep in this half hour summed over every observed day.
    pub accumulated: TimeDelta,
    /// Average sleep per day as a fraction of the half hour, in `[0, 1]`.
    pub fraction: f64,
    /// Whether the bucket sits on a six-hour gridline.
    pub grid: bool,
}

impl TimeOfDayBucket {
    /// Start of the half hour this bucket covers.
    pub fn time(&self) -> NaiveTime {
        let minutes = u32::try_from(self.index * 30).unwrap_or(0);
        NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap_or(NaiveTime::MIN)
    }
}

/// Sleep aggregated by time of day across the whole period.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeOfDayProfile {
    buckets: Vec<TimeOfDayBucket>,
    total_time: TimeDelta,
    number_of_days: i64,
}

impl TimeOfDayProfile {
    /// Aggregates slot coverage into time-of-day buckets.
    ///
    /// Order of `slots` does not matter.
    #[allow(clippy::cast_precision_loss)]
    pub fn aggregate(period: &ObservedPeriod, slots: &[SlotCoverage]) -> Self {
        let mut accumulated = [TimeDelta::zero(); BUCKET_COUNT];
        let mut total_time = TimeDelta::zero();

        for coverage in slots {
            accumulated[bucket_index(coverage.slot.start().time())] += coverage.duration;
            total_time += coverage.duration;
        }

        let number_of_days = period.number_of_days();
        let bucket_capacity = (SLOT_LENGTH * i32::try_from(number_of_days).unwrap_or(i32::MAX))
            .num_milliseconds() as f64;

        let buckets = accumulated
            .iter()
            .enumerate()
            .map(|(index, &accumulated)| TimeOfDayBucket {
                index,
                accumulated,
                fraction: (accumulated.num_milliseconds() as f64 / bucket_capacity).clamp(0.0, 1.0),
                grid: is_grid_bucket(index),
            })
            .collect();

        Self {
            buckets,
            total_time,
            number_of_days,
        }
    }

    /// All buckets, starting at midnight.
    pub fn buckets(&self) -> &[TimeOfDayBucket] {
        &self.buckets
    }

    /// Total sleep over the whole period.
    pub const fn total_time(&self) -> TimeDelta {
        self.total_time
    }

    /// Number of days the buckets are averaged over.
    pub const fn number_of_days(&self) -> i64 {
        self.number_of_days
    }

    /// Smallest and largest bucket fraction.
    pub fn fraction_range(&self) -> (f64, f64) {
        self.buckets
            .iter()
            .map(|b| b.fraction)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), f| {
                (min.min(f), max.max(f))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slots::build_slots;
    use crate::types::TimeSpan;
    use chrono::{NaiveDate, NaiveDateTime};

    fn dt(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn profile_for(spans: &[TimeSpan]) -> TimeOfDayProfile {
        let period = ObservedPeriod::from_spans(spans).unwrap();
        let slots = build_slots(&period, spans);
        TimeOfDayProfile::aggregate(&period, &slots)
    }

    fn bucket_at(profile: &TimeOfDayProfile, hour: u32, minute: u32) -> TimeOfDayBucket {
        profile.buckets()[bucket_index(NaiveTime::from_hms_opt(hour, minute, 0).unwrap())]
    }

    #[test]
    fn bucket_index_by_half_hour() {
        let at = |h, m| bucket_index(NaiveTime::from_hms_opt(h, m, 0).unwrap());
        assert_eq!(at(0, 0), 0);
        assert_eq!(at(0, 29), 0);
        assert_eq!(at(0, 30), 1);
        assert_eq!(at(12, 0), 24);
        assert_eq!(at(23, 30), 47);
        assert_eq!(at(23, 59), 47);
    }

    #[test]
    fn grid_buckets_every_six_hours() {
        let grid: Vec<usize> = (0..BUCKET_COUNT).filter(|&i| is_grid_bucket(i)).collect();
        assert_eq!(grid, vec![0, 12, 24, 36]);
    }

    #[test]
    fn bucket_time_roundtrips_index() {
        for index in 0..BUCKET_COUNT {
            let bucket = TimeOfDayBucket {
                index,
                accumulated: TimeDelta::zero(),
                fraction: 0.0,
                grid: is_grid_bucket(index),
            };
            assert_eq!(bucket_index(bucket.time()), index);
        }
    }

    #[test]
    fn two_nights_scenario() {
        let spans = [
            TimeSpan::new(dt(1, 23, 0), dt(2, 6, 0)).unwrap(),
            TimeSpan::new(dt(2, 23, 30), dt(3, 6, 30)).unwrap(),
        ];
        let profile = profile_for(&spans);

        assert_eq!(profile.number_of_days(), 3);
        assert_eq!(profile.total_time(), TimeDelta::hours(14));
        assert!(bucket_at(&profile, 23, 0).fraction > 0.0);
        assert!(bucket_at(&profile, 23, 30).fraction > 0.0);
        assert!(bucket_at(&profile, 12, 0).fraction.abs() < f64::EPSILON);

        // 23:00 slept one night in three, 23:30 both nights
        assert!((bucket_at(&profile, 23, 0).fraction - 1.0 / 3.0).abs() < 1e-9);
        assert!((bucket_at(&profile, 23, 30).fraction - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn fractions_stay_in_unit_range() {
        let spans = [
            TimeSpan::new(dt(1, 0, 0), dt(3, 0, 0)).unwrap(),
            TimeSpan::new(dt(1, 12, 0), dt(2, 12, 0)).unwrap(),
        ];
        let profile = profile_for(&spans);
        for bucket in profile.buckets() {
            assert!((0.0..=1.0).contains(&bucket.fraction), "{bucket:?}");
        }
    }

    #[test]
    fn total_time_matches_slot_sum() {
        let spans = [
            TimeSpan::new(dt(4, 22, 17), dt(5, 7, 3)).unwrap(),
            TimeSpan::new(dt(5, 14, 0), dt(5, 14, 40)).unwrap(),
        ];
        let period = ObservedPeriod::from_spans(&spans).unwrap();
        let slots = build_slots(&period, &spans);
        let profile = TimeOfDayProfile::aggregate(&period, &slots);

        let slot_sum = slots
            .iter()
            .fold(TimeDelta::zero(), |acc, s| acc + s.duration);
        let bucket_sum = profile
            .buckets()
            .iter()
            .fold(TimeDelta::zero(), |acc, b| acc + b.accumulated);
        assert_eq!(profile.total_time(), slot_sum);
        assert_eq!(bucket_sum, slot_sum);
    }

    #[test]
    fn fraction_range_spans_min_and_max() {
        let spans = [TimeSpan::new(dt(1, 0, 0), dt(1, 0, 30)).unwrap()];
        let profile = profile_for(&spans);
        let (min, max) = profile.fraction_range();
        assert!(min.abs() < f64::EPSILON);
        // One full half hour on the only day
        assert!((max - 1.0).abs() < 1e-9);
    }
}
