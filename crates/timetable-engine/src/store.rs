//! Storage boundary for the scheduling engine.
//!
//! The engine is generic over [`ScheduleStore`]; production deployments back
//! it with a database, tests and the CLI use the serializable [`MemoryStore`].
//!
//! The engine issues plain reads followed by writes. Two callers racing on
//! the same teacher/room/weekday can therefore both pass a conflict check and
//! both write; an implementation serving concurrent writers must make the
//! read-then-write sequence atomic (a serializable transaction, or locking
//! keyed on `(teacher_id, weekday)` and `(room_id, weekday)`).

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::types::{
    NewOccurrence, Occurrence, OccurrenceId, OccurrencePatch, Room, RoomId, Weekday,
};

/// Capacity given to rooms auto-created during a batch commit.
pub const DEFAULT_ROOM_CAPACITY: u32 = 10;

/// Read and write operations the engine needs from an occurrence store.
pub trait ScheduleStore {
    /// All occurrences on the given weekday, excluding `exclude` when
    /// provided. Ordering must be stable across calls while the store is
    /// unchanged; conflict reports inherit it.
    fn occurrences_on(
        &self,
        weekday: Weekday,
        exclude: Option<OccurrenceId>,
    ) -> Result<Vec<Occurrence>>;

    /// A single occurrence by id. `ScheduleError::NotFound` when absent.
    fn occurrence(&self, id: OccurrenceId) -> Result<Occurrence>;

    /// Create an occurrence row and assign it an id.
    fn create_occurrence(&mut self, data: NewOccurrence) -> Result<Occurrence>;

    /// Apply a partial update. This is a raw write: conflict checking happens
    /// in [`crate::class_ops::reschedule_class`] before it is called.
    fn update_occurrence(&mut self, id: OccurrenceId, patch: OccurrencePatch)
        -> Result<Occurrence>;

    /// Remove an occurrence row. `ScheduleError::NotFound` when absent.
    fn delete_occurrence(&mut self, id: OccurrenceId) -> Result<()>;

    /// Look up a room by id.
    fn room(&self, id: RoomId) -> Result<Option<Room>>;

    /// Look up a room by exact name, creating it with default attributes when
    /// it does not exist. Idempotent.
    fn find_or_create_room(&mut self, name: &str) -> Result<Room>;
}

/// In-memory occurrence store with sequential id assignment and
/// insertion-ordered reads. Serializes to JSON, which is how the CLI persists
/// a schedule between invocations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryStore {
    next_occurrence_id: u64,
    next_room_id: u64,
    rooms: Vec<Room>,
    occurrences: Vec<Occurrence>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with existing occurrence rows. Id assignment continues
    /// past the highest seeded id.
    pub fn with_occurrences(occurrences: Vec<Occurrence>) -> Self {
        let next_occurrence_id = occurrences.iter().map(|o| o.id.0).max().unwrap_or(0);
        Self {
            next_occurrence_id,
            next_room_id: 0,
            rooms: Vec::new(),
            occurrences,
        }
    }

    pub fn occurrences(&self) -> &[Occurrence] {
        &self.occurrences
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }
}

impl ScheduleStore for MemoryStore {
    fn occurrences_on(
        &self,
        weekday: Weekday,
        exclude: Option<OccurrenceId>,
    ) -> Result<Vec<Occurrence>> {
        Ok(self
            .occurrences
            .iter()
            .filter(|o| o.weekday == weekday && exclude != Some(o.id))
            .cloned()
            .collect())
    }

    fn occurrence(&self, id: OccurrenceId) -> Result<Occurrence> {
        self.occurrences
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or(ScheduleError::NotFound(id))
    }

    fn create_occurrence(&mut self, data: NewOccurrence) -> Result<Occurrence> {
        self.next_occurrence_id += 1;
        let occurrence = Occurrence {
            id: OccurrenceId(self.next_occurrence_id),
            title: data.title,
            teacher_id: data.teacher_id,
            room_id: data.room_id,
            weekday: data.weekday,
            date: data.date,
            start_time: data.start_time,
            end_time: data.end_time,
            class_type: data.class_type,
            color_code: data.color_code,
        };
        self.occurrences.push(occurrence.clone());
        Ok(occurrence)
    }

    fn update_occurrence(
        &mut self,
        id: OccurrenceId,
        patch: OccurrencePatch,
    ) -> Result<Occurrence> {
        let occurrence = self
            .occurrences
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(ScheduleError::NotFound(id))?;
        if let Some(title) = patch.title {
            occurrence.title = title;
        }
        if let Some(teacher_id) = patch.teacher_id {
            occurrence.teacher_id = teacher_id;
        }
        if let Some(room_id) = patch.room_id {
            occurrence.room_id = room_id;
        }
        if let Some(weekday) = patch.weekday {
            occurrence.weekday = weekday;
        }
        if let Some(start_time) = patch.start_time {
            occurrence.start_time = start_time;
        }
        if let Some(end_time) = patch.end_time {
            occurrence.end_time = end_time;
        }
        if let Some(class_type) = patch.class_type {
            occurrence.class_type = class_type;
        }
        if let Some(color_code) = patch.color_code {
            occurrence.color_code = Some(color_code);
        }
        Ok(occurrence.clone())
    }

    fn delete_occurrence(&mut self, id: OccurrenceId) -> Result<()> {
        let before = self.occurrences.len();
        self.occurrences.retain(|o| o.id != id);
        if self.occurrences.len() == before {
            return Err(ScheduleError::NotFound(id));
        }
        Ok(())
    }

    fn room(&self, id: RoomId) -> Result<Option<Room>> {
        Ok(self.rooms.iter().find(|r| r.id == id).cloned())
    }

    fn find_or_create_room(&mut self, name: &str) -> Result<Room> {
        if let Some(room) = self.rooms.iter().find(|r| r.name == name) {
            return Ok(room.clone());
        }
        self.next_room_id += 1;
        let room = Room {
            id: RoomId(self.next_room_id),
            name: name.to_string(),
            capacity: DEFAULT_ROOM_CAPACITY,
            equipment: String::new(),
        };
        self.rooms.push(room.clone());
        Ok(room)
    }
}
