//! Overlap arithmetic on half-open time intervals.

use chrono::{NaiveDateTime, TimeDelta};

/// A half-open `[start, end)` interval on the naive local timeline.
///
/// Implemented by recorded sessions and by the half-hour slots they are
/// aggregated into, so overlap can be computed between any pair of them.
pub trait Interval {
    /// Inclusive start of the interval.
    fn start(&self) -> NaiveDateTime;

    /// Exclusive end of the interval.
    fn end(&self) -> NaiveDateTime;

    /// Length of the interval.
    fn length(&self) -> TimeDelta {
        self.end() - self.start()
    }
}

/// Returns the duration two intervals share.
///
/// Zero when the intervals are disjoint or merely abut; never negative.
pub fn overlap<A: Interval + ?Sized, B: Interval + ?Sized>(a: &A, b: &B) -> TimeDelta {
    let start = a.start().max(b.start());
    let end = a.end().min(b.end());
    if start >= end {
        return TimeDelta::zero();
    }
    end - start
}

/// Returns how much of `window` is covered by at least one of `intervals`.
///
/// Each interval is clipped to the window and the clipped pieces are merged,
/// so overlapping intervals are only counted once. The result never exceeds
/// the window length.
pub fn covered<W, I>(window: &W, intervals: &[I]) -> TimeDelta
where
    W: Interval + ?Sized,
    I: Interval,
{
    let mut pieces: Vec<(NaiveDateTime, NaiveDateTime)> = intervals
        .iter()
        .filter(|i| overlap(window, *i) > TimeDelta::zero())
        .map(|i| (i.start().max(window.start()), i.end().min(window.end())))
        .collect();
    if pieces.is_empty() {
        return TimeDelta::zero();
    }
    pieces.sort_by_key(|&(start, _)| start);

    // Merge overlapping pieces
    let mut merged: Vec<(NaiveDateTime, NaiveDateTime)> = Vec::with_capacity(pieces.len());
    for (start, end) in pieces {
        if let Some(last) = merged.last_mut() {
            if start <= last.1 {
                last.1 = last.1.max(end);
            } else {
                merged.push((start, end));
            }
        } else {
            merged.push((start, end));
        }
    }

    merged
        .iter()
        .fold(TimeDelta::zero(), |acc, (start, end)| acc + (*end - *start))
}
