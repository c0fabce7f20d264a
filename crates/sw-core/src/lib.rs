//! Core engine for the sleep report.
//!
//! This crate turns a list of recorded sleep sessions into:
//! - Slot coverage: sleep per half hour over the whole observed period
//! - A time-of-day profile and its stacked, quantized histogram
//! - Per-day bars of quantized levels, newest day first
//!
//! It also reads the line-oriented sleep log those sessions come from.

mod calendar;
pub mod interval;
pub mod profile;
pub mod quantize;
mod report;
pub mod sleep_log;
pub mod slots;
pub mod types;

pub use calendar::{DayBar, walk_calendar};
pub use interval::{Interval, overlap};
pub use profile::{BUCKET_COUNT, TimeOfDayBucket, TimeOfDayProfile};
pub use quantize::{Histogram, HistogramCell, HistogramRow, Normalizer};
pub use report::{ReportError, ReportOptions, SleepReport};
pub use sleep_log::{LogError, SleepLog, read_log};
pub use slots::{ObservedPeriod, PeriodError, Slot, SlotCoverage, build_slots};
pub use types::{TimeSpan, ValidationError};
