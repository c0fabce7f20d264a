//! Core type definitions with validation.

use chrono::{NaiveDateTime, TimeDelta};
use thiserror::Error;

use crate::interval::Interval;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A session that ends before (or when) it starts.
    #[error("sleep session must end after it starts: {from} - {to}")]
    EmptySpan {
        from: NaiveDateTime,
        to: NaiveDateTime,
    },
}

/// One recorded sleep session.
///
/// The invariant `from < to` is checked on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeSpan {
    from: NaiveDateTime,
    to: NaiveDateTime,
}

impl TimeSpan {
    /// Creates a new session after validation.
    pub fn new(from: NaiveDateTime, to: NaiveDateTime) -> Result<Self, ValidationError> {
        if from >= to {
            return Err(ValidationError::EmptySpan { from, to });
        }
        Ok(Self { from, to })
    }

    /// When the session started.
    pub const fn from(&self) -> NaiveDateTime {
        self.from
    }

    /// When the session ended.
    pub const fn to(&self) -> NaiveDateTime {
        self.to
    }

    /// How long the session lasted.
    pub fn duration(&self) -> TimeDelta {
        self.to - self.from
    }
}

impl Interval for TimeSpan {
    fn start(&self) -> NaiveDateTime {
        self.from
    }

    fn end(&self) -> NaiveDateTime {
        self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn time_span_rejects_reversed_bounds() {
        let err = TimeSpan::new(dt(2, 6, 0), dt(1, 23, 0)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::EmptySpan {
                from: dt(2, 6, 0),
                to: dt(1, 23, 0),
            }
        );
    }

    #[test]
    fn time_span_rejects_zero_length() {
        assert!(TimeSpan::new(dt(1, 23, 0), dt(1, 23, 0)).is_err());
    }

    #[test]
    fn time_span_duration() {
        let span = TimeSpan::new(dt(1, 23, 0), dt(2, 6, 0)).unwrap();
        assert_eq!(span.duration(), TimeDelta::hours(7));
        assert_eq!(span.length(), span.duration());
    }
}
