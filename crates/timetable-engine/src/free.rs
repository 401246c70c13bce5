//! Free-window computation for a teacher or a room on a given weekday.
//!
//! Clips the resource's bookings to a wall-clock window, merges overlapping
//! busy intervals, and returns the gaps between them.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::overlap::minute_of_day;
use crate::store::ScheduleStore;
use crate::types::{RoomId, TeacherId, Weekday, HM_FORMAT};

/// The resource whose bookings are consulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Resource {
    Teacher(TeacherId),
    Room(RoomId),
}

/// A gap with no booking for the resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeWindow {
    #[serde(with = "crate::types::time_hm")]
    pub start: NaiveTime,
    #[serde(with = "crate::types::time_hm")]
    pub end: NaiveTime,
    pub duration_minutes: i64,
}

/// Free windows for a resource on a weekday, within `[window_start,
/// window_end)`. Bookings may overlap each other; overlapping busy intervals
/// are merged before the gaps are computed. Windows come back sorted by
/// start time.
pub fn free_windows<S: ScheduleStore>(
    store: &S,
    resource: &Resource,
    weekday: Weekday,
    window_start: NaiveTime,
    window_end: NaiveTime,
) -> Result<Vec<FreeWindow>> {
    if window_start >= window_end {
        return Err(ScheduleError::Validation(format!(
            "window start {} must be earlier than window end {}",
            window_start.format(HM_FORMAT),
            window_end.format(HM_FORMAT)
        )));
    }

    let occurrences = store.occurrences_on(weekday, None)?;

    // Bookings for this resource, clipped to the window; anything entirely
    // outside is discarded.
    let mut intervals: Vec<(NaiveTime, NaiveTime)> = occurrences
        .iter()
        .filter(|o| match resource {
            Resource::Teacher(teacher_id) => &o.teacher_id == teacher_id,
            Resource::Room(room_id) => o.room_id == *room_id,
        })
        .filter(|o| o.start_time < window_end && o.end_time > window_start)
        .map(|o| (o.start_time.max(window_start), o.end_time.min(window_end)))
        .collect();

    intervals.sort();

    let mut merged: Vec<(NaiveTime, NaiveTime)> = Vec::new();
    for (start, end) in intervals {
        if let Some(last) = merged.last_mut() {
            if start <= last.1 {
                last.1 = last.1.max(end);
                continue;
            }
        }
        merged.push((start, end));
    }

    let mut windows = Vec::new();
    let mut cursor = window_start;
    for (busy_start, busy_end) in &merged {
        if cursor < *busy_start {
            windows.push(window(cursor, *busy_start));
        }
        cursor = cursor.max(*busy_end);
    }
    if cursor < window_end {
        windows.push(window(cursor, window_end));
    }

    Ok(windows)
}

fn window(start: NaiveTime, end: NaiveTime) -> FreeWindow {
    FreeWindow {
        start,
        end,
        duration_minutes: i64::from(minute_of_day(end)) - i64::from(minute_of_day(start)),
    }
}
