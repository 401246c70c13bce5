//! Single-class lifecycle: create, reschedule, delete.
//!
//! A class is only written after passing conflict detection with zero
//! conflicts. A reschedule re-checks the proposed new tuple while excluding
//! the class's own id, and rejects atomically — nothing is applied when the
//! move would conflict.

use serde::{Deserialize, Serialize};

use crate::conflict::{check_conflicts, ConflictReport};
use crate::error::{Result, ScheduleError};
use crate::store::ScheduleStore;
use crate::types::{
    check_time_window, ClassRequest, Occurrence, OccurrenceId, OccurrencePatch, ProposedSlot,
    RoomId,
};

/// Outcome of a create or reschedule attempt. A conflicting placement is
/// data, not an error: the report carries everything the caller needs to
/// render a summary and itemized detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Placement {
    #[serde(rename = "scheduled")]
    Scheduled { occurrence: Occurrence },
    #[serde(rename = "conflict")]
    Rejected { report: ConflictReport },
}

/// Place a single weekly class.
///
/// The room must already exist — unlike batch commit, the single path never
/// provisions rooms as a side effect.
pub fn create_class<S: ScheduleStore>(store: &mut S, request: &ClassRequest) -> Result<Placement> {
    request.validate()?;
    resolve_room(store, request.room_id)?;

    let report = check_conflicts(store, &request.slot(), None)?;
    if report.has_conflict {
        return Ok(Placement::Rejected { report });
    }

    let occurrence = store.create_occurrence(request.to_new_occurrence())?;
    Ok(Placement::Scheduled { occurrence })
}

/// Move an existing class to the slot described by the patch.
///
/// The conflict check runs against the merged (existing + patch) tuple with
/// the class's own id excluded, so moving a class within its current slot
/// does not flag a conflict with itself.
pub fn reschedule_class<S: ScheduleStore>(
    store: &mut S,
    id: OccurrenceId,
    patch: &OccurrencePatch,
) -> Result<Placement> {
    let existing = store.occurrence(id)?;
    let merged = existing.merged_with(patch);

    if merged.title.trim().is_empty() {
        return Err(ScheduleError::Validation(
            "title must not be empty".to_string(),
        ));
    }
    if merged.teacher_id.0.trim().is_empty() {
        return Err(ScheduleError::Validation(
            "teacher id must not be empty".to_string(),
        ));
    }
    check_time_window(merged.start_time, merged.end_time)?;
    if patch.room_id.is_some() {
        resolve_room(store, merged.room_id)?;
    }

    let slot = ProposedSlot {
        teacher_id: merged.teacher_id.clone(),
        room_id: merged.room_id,
        weekday: merged.weekday,
        date: merged.date,
        start_time: merged.start_time,
        end_time: merged.end_time,
    };
    let report = check_conflicts(store, &slot, Some(id))?;
    if report.has_conflict {
        return Ok(Placement::Rejected { report });
    }

    let occurrence = store.update_occurrence(id, patch.clone())?;
    Ok(Placement::Scheduled { occurrence })
}

/// Remove a class by id.
pub fn delete_class<S: ScheduleStore>(store: &mut S, id: OccurrenceId) -> Result<()> {
    store.delete_occurrence(id)
}

fn resolve_room<S: ScheduleStore>(store: &S, id: RoomId) -> Result<()> {
    if store.room(id)?.is_none() {
        return Err(ScheduleError::Validation(format!(
            "room {id} does not exist"
        )));
    }
    Ok(())
}
