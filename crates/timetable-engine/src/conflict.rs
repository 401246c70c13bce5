//! Conflict detection for proposed schedule slots.
//!
//! A proposed slot conflicts with an existing occurrence when both can land
//! on the same day, their time ranges overlap, and they share a teacher or a
//! room. Detection never mutates the store.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::overlap::overlaps;
use crate::store::ScheduleStore;
use crate::types::{Occurrence, OccurrenceId, ProposedSlot};

/// Which shared resource a conflict is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConflictKind {
    Teacher,
    Room,
}

impl std::fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Teacher => "TEACHER",
            Self::Room => "ROOM",
        })
    }
}

/// One collision with an existing occurrence. An occurrence sharing both the
/// teacher and the room with the proposal produces two entries, one per kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub kind: ConflictKind,
    pub conflicting_occurrence: Occurrence,
}

/// Outcome of a conflict check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictReport {
    pub has_conflict: bool,
    /// Teacher conflicts first, then room conflicts, each in store order.
    pub conflicts: Vec<Conflict>,
    /// Summary derived from the per-kind counts. Empty when clear.
    pub message: String,
}

/// Check a proposed slot against every occurrence on its weekday.
///
/// `exclude` leaves one existing occurrence out of the search so that a
/// reschedule does not flag a conflict with itself.
///
/// A candidate with a concrete calendar date only collides with a proposal
/// pinned to that same date; weekly rows (no date) recur every week and are
/// always candidates. This is what lets a batch place the same weekday/time
/// slot across consecutive weeks without tripping over its own earlier
/// creations.
pub fn check_conflicts<S: ScheduleStore>(
    store: &S,
    proposed: &ProposedSlot,
    exclude: Option<OccurrenceId>,
) -> Result<ConflictReport> {
    let candidates = store.occurrences_on(proposed.weekday, exclude)?;

    let mut conflicts = Vec::new();
    let mut teacher_hits = 0usize;
    let mut room_hits = 0usize;

    for candidate in &candidates {
        if candidate.teacher_id == proposed.teacher_id && collides(proposed, candidate) {
            teacher_hits += 1;
            conflicts.push(Conflict {
                kind: ConflictKind::Teacher,
                conflicting_occurrence: candidate.clone(),
            });
        }
    }
    for candidate in &candidates {
        if candidate.room_id == proposed.room_id && collides(proposed, candidate) {
            room_hits += 1;
            conflicts.push(Conflict {
                kind: ConflictKind::Room,
                conflicting_occurrence: candidate.clone(),
            });
        }
    }

    Ok(ConflictReport {
        has_conflict: !conflicts.is_empty(),
        conflicts,
        message: build_message(teacher_hits, room_hits),
    })
}

fn collides(proposed: &ProposedSlot, candidate: &Occurrence) -> bool {
    let same_day = match (proposed.date, candidate.date) {
        (Some(proposed_date), Some(candidate_date)) => proposed_date == candidate_date,
        _ => true,
    };
    same_day
        && overlaps(
            proposed.start_time,
            proposed.end_time,
            candidate.start_time,
            candidate.end_time,
        )
}

fn build_message(teacher_hits: usize, room_hits: usize) -> String {
    let mut clauses = Vec::new();
    if teacher_hits > 0 {
        clauses.push(format!(
            "Teacher is already scheduled for {} {} at this time",
            teacher_hits,
            classes(teacher_hits)
        ));
    }
    if room_hits > 0 {
        clauses.push(format!(
            "Room is already booked for {} {} at this time",
            room_hits,
            classes(room_hits)
        ));
    }
    clauses.join(". ")
}

fn classes(n: usize) -> &'static str {
    if n == 1 {
        "class"
    } else {
        "classes"
    }
}
