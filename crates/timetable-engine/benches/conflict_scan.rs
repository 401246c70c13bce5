//! Benchmarks: conflict scan against a populated weekday, and a one-year
//! recurrence enumeration.

use std::hint::black_box;

use chrono::{NaiveDate, NaiveTime};
use criterion::{criterion_group, criterion_main, Criterion};
use timetable_engine::check_conflicts;
use timetable_engine::recurrence::enumerate_dates;
use timetable_engine::store::{MemoryStore, ScheduleStore};
use timetable_engine::types::{
    ClassType, NewOccurrence, ProposedSlot, RecurrenceRequest, RecurrenceSpan, RoomId, TeacherId,
    Weekday,
};

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn seeded_store(count: u64) -> MemoryStore {
    let mut store = MemoryStore::new();
    for i in 0..count {
        let hour = (8 + i % 10) as u32;
        store
            .create_occurrence(NewOccurrence {
                title: format!("Class {i}"),
                teacher_id: TeacherId::new(format!("t-{}", i % 40)),
                room_id: RoomId(i % 12),
                weekday: Weekday::Monday,
                date: None,
                start_time: t(hour, 0),
                end_time: t(hour + 1, 0),
                class_type: ClassType::Group,
                color_code: None,
            })
            .unwrap();
    }
    store
}

fn bench_conflict_scan(c: &mut Criterion) {
    let store = seeded_store(500);
    let proposed = ProposedSlot {
        teacher_id: TeacherId::new("t-7"),
        room_id: RoomId(3),
        weekday: Weekday::Monday,
        date: None,
        start_time: t(12, 0),
        end_time: t(13, 0),
    };

    c.bench_function("check_conflicts/500_occurrences", |b| {
        b.iter(|| check_conflicts(black_box(&store), black_box(&proposed), None).unwrap());
    });
}

fn bench_enumerate_year(c: &mut Criterion) {
    let request = RecurrenceRequest {
        title: "Standing Classes".to_string(),
        teacher_id: TeacherId::new("t-1"),
        room_name: "Studio A".to_string(),
        weekdays: vec![Weekday::Monday, Weekday::Wednesday, Weekday::Friday],
        start_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        span: RecurrenceSpan::Weeks(52),
        daily_start_time: t(9, 0),
        daily_end_time: t(10, 0),
        class_type: ClassType::Group,
        color_code: None,
    };

    c.bench_function("enumerate_dates/one_year", |b| {
        b.iter(|| enumerate_dates(black_box(&request)).unwrap());
    });
}

criterion_group!(benches, bench_conflict_scan, bench_enumerate_year);
criterion_main!(benches);
