//! Tests for the single-class lifecycle: create, reschedule, delete.

use chrono::NaiveTime;
use timetable_engine::store::{MemoryStore, ScheduleStore};
use timetable_engine::types::{
    ClassRequest, ClassType, Occurrence, OccurrenceId, OccurrencePatch, RoomId, TeacherId, Weekday,
};
use timetable_engine::{create_class, delete_class, reschedule_class, Placement, ScheduleError};

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn store_with_room() -> (MemoryStore, RoomId) {
    let mut store = MemoryStore::new();
    let room = store.find_or_create_room("Studio A").unwrap();
    (store, room.id)
}

fn class(teacher: &str, room: RoomId, weekday: Weekday, start: NaiveTime, end: NaiveTime) -> ClassRequest {
    ClassRequest {
        title: "Salsa Beginners".to_string(),
        teacher_id: TeacherId::new(teacher),
        room_id: room,
        weekday,
        start_time: start,
        end_time: end,
        class_type: ClassType::Group,
        color_code: None,
    }
}

fn scheduled(placement: Placement) -> Occurrence {
    match placement {
        Placement::Scheduled { occurrence } => occurrence,
        Placement::Rejected { report } => panic!("unexpected conflict: {}", report.message),
    }
}

#[test]
fn create_places_a_clean_class() {
    let (mut store, room) = store_with_room();
    let placement = create_class(
        &mut store,
        &class("t-amara", room, Weekday::Monday, t(9, 0), t(10, 0)),
    )
    .unwrap();

    let occurrence = scheduled(placement);
    assert_eq!(occurrence.id, OccurrenceId(1));
    assert!(occurrence.date.is_none());
    assert_eq!(store.occurrences().len(), 1);
}

#[test]
fn create_rejects_a_colliding_class() {
    let (mut store, room) = store_with_room();
    create_class(
        &mut store,
        &class("t-amara", room, Weekday::Monday, t(9, 0), t(10, 0)),
    )
    .unwrap();

    let placement = create_class(
        &mut store,
        &class("t-amara", room, Weekday::Monday, t(9, 30), t(10, 30)),
    )
    .unwrap();

    match placement {
        Placement::Rejected { report } => {
            assert!(report.has_conflict);
            assert_eq!(report.conflicts.len(), 2); // same teacher and same room
        }
        Placement::Scheduled { .. } => panic!("expected a conflict"),
    }
    assert_eq!(store.occurrences().len(), 1, "nothing may be written");
}

#[test]
fn create_requires_an_existing_room() {
    let mut store = MemoryStore::new();
    let result = create_class(
        &mut store,
        &class("t-amara", RoomId(99), Weekday::Monday, t(9, 0), t(10, 0)),
    );
    assert!(matches!(result, Err(ScheduleError::Validation(_))));
}

#[test]
fn create_rejects_inverted_times() {
    let (mut store, room) = store_with_room();
    let result = create_class(
        &mut store,
        &class("t-amara", room, Weekday::Monday, t(10, 0), t(9, 0)),
    );
    assert!(matches!(result, Err(ScheduleError::Validation(_))));
}

#[test]
fn create_rejects_blank_teacher() {
    let (mut store, room) = store_with_room();
    let result = create_class(
        &mut store,
        &class("   ", room, Weekday::Monday, t(9, 0), t(10, 0)),
    );
    assert!(matches!(result, Err(ScheduleError::Validation(_))));
}

#[test]
fn reschedule_within_own_slot_is_clear() {
    // Nudging a class five minutes later overlaps its old slot; excluding its
    // own id keeps that from counting as a conflict.
    let (mut store, room) = store_with_room();
    let occurrence = scheduled(
        create_class(
            &mut store,
            &class("t-amara", room, Weekday::Monday, t(9, 0), t(10, 0)),
        )
        .unwrap(),
    );

    let patch = OccurrencePatch {
        start_time: Some(t(9, 5)),
        end_time: Some(t(10, 5)),
        ..OccurrencePatch::default()
    };
    let moved = scheduled(reschedule_class(&mut store, occurrence.id, &patch).unwrap());

    assert_eq!(moved.start_time, t(9, 5));
    assert_eq!(moved.end_time, t(10, 5));
}

#[test]
fn reschedule_into_another_class_is_rejected_atomically() {
    let (mut store, room) = store_with_room();
    scheduled(
        create_class(
            &mut store,
            &class("t-amara", room, Weekday::Monday, t(9, 0), t(10, 0)),
        )
        .unwrap(),
    );
    let victim = scheduled(
        create_class(
            &mut store,
            &class("t-amara", room, Weekday::Monday, t(11, 0), t(12, 0)),
        )
        .unwrap(),
    );

    let patch = OccurrencePatch {
        start_time: Some(t(9, 30)),
        end_time: Some(t(10, 30)),
        ..OccurrencePatch::default()
    };
    let placement = reschedule_class(&mut store, victim.id, &patch).unwrap();

    assert!(matches!(placement, Placement::Rejected { .. }));

    // The move was rejected before anything was applied.
    let untouched = store.occurrence(victim.id).unwrap();
    assert_eq!(untouched.start_time, t(11, 0));
    assert_eq!(untouched.end_time, t(12, 0));
}

#[test]
fn reschedule_to_a_free_weekday_is_clear() {
    let (mut store, room) = store_with_room();
    let occurrence = scheduled(
        create_class(
            &mut store,
            &class("t-amara", room, Weekday::Monday, t(9, 0), t(10, 0)),
        )
        .unwrap(),
    );

    let patch = OccurrencePatch {
        weekday: Some(Weekday::Thursday),
        ..OccurrencePatch::default()
    };
    let moved = scheduled(reschedule_class(&mut store, occurrence.id, &patch).unwrap());
    assert_eq!(moved.weekday, Weekday::Thursday);
}

#[test]
fn reschedule_of_unknown_id_is_not_found() {
    let mut store = MemoryStore::new();
    let result = reschedule_class(&mut store, OccurrenceId(42), &OccurrencePatch::default());
    assert!(matches!(result, Err(ScheduleError::NotFound(_))));
}

#[test]
fn reschedule_rejects_inverted_merged_times() {
    let (mut store, room) = store_with_room();
    let occurrence = scheduled(
        create_class(
            &mut store,
            &class("t-amara", room, Weekday::Monday, t(9, 0), t(10, 0)),
        )
        .unwrap(),
    );

    // Only the start moves, past the existing end.
    let patch = OccurrencePatch {
        start_time: Some(t(10, 30)),
        ..OccurrencePatch::default()
    };
    let result = reschedule_class(&mut store, occurrence.id, &patch);
    assert!(matches!(result, Err(ScheduleError::Validation(_))));
}

#[test]
fn delete_removes_the_class() {
    let (mut store, room) = store_with_room();
    let occurrence = scheduled(
        create_class(
            &mut store,
            &class("t-amara", room, Weekday::Monday, t(9, 0), t(10, 0)),
        )
        .unwrap(),
    );

    delete_class(&mut store, occurrence.id).unwrap();
    assert!(store.occurrences().is_empty());

    let again = delete_class(&mut store, occurrence.id);
    assert!(matches!(again, Err(ScheduleError::NotFound(_))));
}
