//! # timetable-engine
//!
//! Conflict-checked weekly class scheduling. The engine decides whether a
//! proposed placement collides with any existing one (no teacher or room is
//! ever double-booked) and deterministically expands recurrence rules into
//! concrete dated occurrences, skipping — never overwriting — the dates that
//! collide.
//!
//! Storage is a boundary: every operation is generic over [`ScheduleStore`],
//! and behavior is a pure function of the request plus the store's current
//! content. The bundled [`MemoryStore`] backs the tests and the CLI.
//!
//! ## Modules
//!
//! - [`overlap`] — half-open interval overlap test, the leaf everything else
//!   stands on
//! - [`conflict`] — teacher/room conflict detection against the store
//! - [`recurrence`] — recurrence expansion, preview, and batch commit
//! - [`class_ops`] — single-class create/reschedule/delete
//! - [`free`] — free-window computation for a teacher or a room
//! - [`store`] — storage boundary trait plus the in-memory implementation
//! - [`types`] — domain types
//! - [`error`] — error types
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::NaiveTime;
//! use timetable_engine::store::{MemoryStore, ScheduleStore};
//! use timetable_engine::types::{ClassRequest, ClassType, TeacherId, Weekday};
//! use timetable_engine::{create_class, Placement};
//!
//! let mut store = MemoryStore::new();
//! let room = store.find_or_create_room("Studio A").unwrap();
//!
//! let request = ClassRequest {
//!     title: "Morning Yoga".into(),
//!     teacher_id: TeacherId::new("t-amara"),
//!     room_id: room.id,
//!     weekday: Weekday::Monday,
//!     start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
//!     end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
//!     class_type: ClassType::Group,
//!     color_code: None,
//! };
//!
//! // The first placement lands; an identical second one is rejected with a
//! // report instead of an error.
//! assert!(matches!(
//!     create_class(&mut store, &request).unwrap(),
//!     Placement::Scheduled { .. }
//! ));
//! match create_class(&mut store, &request).unwrap() {
//!     Placement::Rejected { report } => assert!(report.has_conflict),
//!     Placement::Scheduled { .. } => panic!("expected a conflict"),
//! }
//! ```

pub mod class_ops;
pub mod conflict;
pub mod error;
pub mod free;
pub mod overlap;
pub mod recurrence;
pub mod store;
pub mod types;

pub use class_ops::{create_class, delete_class, reschedule_class, Placement};
pub use conflict::{check_conflicts, Conflict, ConflictKind, ConflictReport};
pub use error::ScheduleError;
pub use free::{free_windows, FreeWindow, Resource};
pub use overlap::overlaps;
pub use recurrence::{
    commit_recurrence, enumerate_dates, preview_recurrence, BatchOutcome, RecurrencePreview,
};
pub use store::{MemoryStore, ScheduleStore};
