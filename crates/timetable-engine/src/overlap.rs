//! Half-open interval overlap test for wall-clock time ranges.
//!
//! Intervals that merely touch at a boundary (one ends exactly when the other
//! starts) do NOT overlap, so back-to-back scheduling is always legal.

use chrono::{NaiveTime, Timelike};

/// Minute-of-day of a wall-clock time. Seconds are ignored; the engine works
/// at minute granularity.
pub(crate) fn minute_of_day(t: NaiveTime) -> u32 {
    t.hour() * 60 + t.minute()
}

/// Report whether the half-open intervals `[start_a, end_a)` and
/// `[start_b, end_b)` share at least one minute of the same day.
///
/// Two intervals overlap iff `start_a < end_b && end_a > start_b`, which
/// excludes the adjacent case where `end_a == start_b`.
///
/// Callers are expected to pass well-formed intervals (`start < end`); a
/// malformed interval is a caller bug, not a condition this function handles.
pub fn overlaps(
    start_a: NaiveTime,
    end_a: NaiveTime,
    start_b: NaiveTime,
    end_b: NaiveTime,
) -> bool {
    let (s1, e1) = (minute_of_day(start_a), minute_of_day(end_a));
    let (s2, e2) = (minute_of_day(start_b), minute_of_day(end_b));
    s1 < e2 && e1 > s2
}
