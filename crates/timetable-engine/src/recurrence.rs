//! Recurrence expansion and batch commit.
//!
//! A recurrence rule (weekday set + date range + daily time window) expands
//! into concrete dated occurrences. Preview enumerates without touching the
//! store; commit conflict-checks each date in ascending order, creates the
//! clean ones, and records the rest as skipped. Both run the same
//! enumeration, so a preview shows exactly the dates a commit would process.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::conflict::{check_conflicts, Conflict};
use crate::error::Result;
use crate::store::ScheduleStore;
use crate::types::{NewOccurrence, Occurrence, ProposedSlot, RecurrenceRequest, Weekday};

/// Reason recorded when a store write fails mid-batch.
const CREATE_FAILED: &str = "Failed to create class";

/// One enumerated calendar date of a recurrence rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedDate {
    pub date: NaiveDate,
    pub weekday: Weekday,
}

/// Occurrence count for one ISO week, keyed by the Monday that starts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekBucket {
    pub week_start: NaiveDate,
    pub count: usize,
}

/// Read-only expansion of a recurrence rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrencePreview {
    pub dates: Vec<PlannedDate>,
    pub total_count: usize,
    /// Per-week counts in ascending week order. Display aid only.
    pub weekly_breakdown: Vec<WeekBucket>,
}

/// A date the batch could not place, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedDate {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conflict_details: Vec<Conflict>,
}

/// Result of a batch commit. Partial success is the designed behavior:
/// skipped dates never abort the rest of the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    pub created_count: usize,
    pub total_count: usize,
    pub created: Vec<Occurrence>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedDate>,
}

/// Enumerate every calendar date the rule matches, in ascending order.
///
/// Walks the range one day at a time so every instance of every requested
/// weekday is hit regardless of which weekday the start date falls on. The
/// end of the range is inclusive: `startDate + weeks*7` days for week-count
/// rules, the explicit end date otherwise.
pub fn enumerate_dates(request: &RecurrenceRequest) -> Result<Vec<PlannedDate>> {
    request.validate_rule()?;

    let end = request.end_date();
    let mut dates = Vec::new();
    let mut day = request.start_date;
    while day <= end {
        let weekday = Weekday::from_date(day);
        if request.weekdays.contains(&weekday) {
            dates.push(PlannedDate { date: day, weekday });
        }
        day += Duration::days(1);
    }
    Ok(dates)
}

/// Expand a rule without touching the store.
pub fn preview_recurrence(request: &RecurrenceRequest) -> Result<RecurrencePreview> {
    let dates = enumerate_dates(request)?;
    let weekly_breakdown = weekly_breakdown(&dates);
    Ok(RecurrencePreview {
        total_count: dates.len(),
        dates,
        weekly_breakdown,
    })
}

/// Expand a rule and commit it: each enumerated date is conflict-checked in
/// ascending order and either created or recorded as skipped.
///
/// Dates are processed strictly one at a time because a later date's check
/// must see the rows created by earlier dates of the same batch. A per-date
/// store failure becomes a skip entry; only validation failures reject the
/// batch as a whole, before any store access.
pub fn commit_recurrence<S: ScheduleStore>(
    store: &mut S,
    request: &RecurrenceRequest,
) -> Result<BatchOutcome> {
    request.validate()?;
    let planned = enumerate_dates(request)?;
    let total_count = planned.len();

    let mut created = Vec::new();
    let mut skipped = Vec::new();

    for entry in &planned {
        // Lookup-or-create is idempotent, so resolving per date keeps each
        // iteration self-contained.
        let room = match store.find_or_create_room(&request.room_name) {
            Ok(room) => room,
            Err(err) => {
                skipped.push(skip(entry, err.to_string(), Vec::new()));
                continue;
            }
        };

        let slot = ProposedSlot {
            teacher_id: request.teacher_id.clone(),
            room_id: room.id,
            weekday: entry.weekday,
            date: Some(entry.date),
            start_time: request.daily_start_time,
            end_time: request.daily_end_time,
        };

        let report = match check_conflicts(store, &slot, None) {
            Ok(report) => report,
            Err(err) => {
                skipped.push(skip(entry, err.to_string(), Vec::new()));
                continue;
            }
        };

        if report.has_conflict {
            skipped.push(skip(entry, report.message, report.conflicts));
            continue;
        }

        let data = NewOccurrence {
            title: request.title.clone(),
            teacher_id: request.teacher_id.clone(),
            room_id: room.id,
            weekday: entry.weekday,
            date: Some(entry.date),
            start_time: request.daily_start_time,
            end_time: request.daily_end_time,
            class_type: request.class_type,
            color_code: request.color_code.clone(),
        };
        match store.create_occurrence(data) {
            Ok(occurrence) => created.push(occurrence),
            Err(_) => skipped.push(skip(entry, CREATE_FAILED.to_string(), Vec::new())),
        }
    }

    Ok(BatchOutcome {
        created_count: created.len(),
        total_count,
        created,
        skipped,
    })
}

fn skip(entry: &PlannedDate, reason: String, conflict_details: Vec<Conflict>) -> SkippedDate {
    SkippedDate {
        date: entry.date,
        weekday: entry.weekday,
        reason,
        conflict_details,
    }
}

/// Group enumerated dates by the Monday starting their ISO week. The input
/// is ascending, so each week's dates are contiguous.
fn weekly_breakdown(dates: &[PlannedDate]) -> Vec<WeekBucket> {
    let mut buckets: Vec<WeekBucket> = Vec::new();
    for planned in dates {
        let week_start = monday_of(planned.date);
        match buckets.last_mut() {
            Some(last) if last.week_start == week_start => last.count += 1,
            _ => buckets.push(WeekBucket {
                week_start,
                count: 1,
            }),
        }
    }
    buckets
}

fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}
