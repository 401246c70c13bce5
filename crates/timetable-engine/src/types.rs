//! Domain types shared across the scheduling engine.
//!
//! Times are wall-clock `NaiveTime` values at minute granularity and serialize
//! as `"HH:MM"`. Weekdays carry their full ISO names (`"Monday"`…`"Sunday"`)
//! on the wire. Identifiers are newtypes: occurrence and room ids are assigned
//! by the store, teacher ids are opaque references to an external entity that
//! the engine only ever compares for equality.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

pub(crate) const HM_FORMAT: &str = "%H:%M";

/// Serialize/deserialize a `NaiveTime` as `"HH:MM"`.
pub(crate) mod time_hm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(super::HM_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, super::HM_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Serialize/deserialize an `Option<NaiveTime>` as `"HH:MM"` / null.
pub(crate) mod time_hm_opt {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(t) => serializer.serialize_str(&t.format(super::HM_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| {
            NaiveTime::parse_from_str(&s, super::HM_FORMAT).map_err(serde::de::Error::custom)
        })
        .transpose()
    }
}

/// Reject a zero-length or inverted time window before it reaches conflict
/// checking.
pub(crate) fn check_time_window(start: NaiveTime, end: NaiveTime) -> Result<()> {
    if start >= end {
        return Err(ScheduleError::Validation(format!(
            "start time {} must be earlier than end time {}",
            start.format(HM_FORMAT),
            end.format(HM_FORMAT)
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Store-assigned identifier of a scheduled class instance.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct OccurrenceId(pub u64);

impl fmt::Display for OccurrenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store-assigned identifier of a room.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RoomId(pub u64);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque reference to a teacher entity managed outside the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeacherId(pub String);

impl TeacherId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for TeacherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Weekday and class type
// ---------------------------------------------------------------------------

/// ISO weekday, serialized by its full English name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Weekday of a calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        match date.weekday() {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "monday" | "mon" => Ok(Self::Monday),
            "tuesday" | "tue" => Ok(Self::Tuesday),
            "wednesday" | "wed" => Ok(Self::Wednesday),
            "thursday" | "thu" => Ok(Self::Thursday),
            "friday" | "fri" => Ok(Self::Friday),
            "saturday" | "sat" => Ok(Self::Saturday),
            "sunday" | "sun" => Ok(Self::Sunday),
            other => Err(ScheduleError::Validation(format!(
                "unknown weekday: {other}"
            ))),
        }
    }
}

/// Informational class category. Has no effect on conflict logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClassType {
    Group,
    Private,
}

impl fmt::Display for ClassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Group => "GROUP",
            Self::Private => "PRIVATE",
        })
    }
}

impl FromStr for ClassType {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "group" => Ok(Self::Group),
            "private" => Ok(Self::Private),
            other => Err(ScheduleError::Validation(format!(
                "unknown class type: {other}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Stored entities
// ---------------------------------------------------------------------------

/// A single scheduled class instance.
///
/// Weekly rows recur on their weekday with no concrete date. Rows materialized
/// from a recurrence batch additionally carry the calendar `date` they land
/// on; such rows are independent — they hold no back-reference to the rule
/// that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    pub id: OccurrenceId,
    pub title: String,
    pub teacher_id: TeacherId,
    pub room_id: RoomId,
    pub weekday: Weekday,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(with = "time_hm")]
    pub start_time: NaiveTime,
    #[serde(with = "time_hm")]
    pub end_time: NaiveTime,
    pub class_type: ClassType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_code: Option<String>,
}

impl Occurrence {
    /// Candidate state after applying a patch, used to validate and
    /// conflict-check a reschedule before anything is written.
    pub fn merged_with(&self, patch: &OccurrencePatch) -> Occurrence {
        Occurrence {
            id: self.id,
            title: patch.title.clone().unwrap_or_else(|| self.title.clone()),
            teacher_id: patch
                .teacher_id
                .clone()
                .unwrap_or_else(|| self.teacher_id.clone()),
            room_id: patch.room_id.unwrap_or(self.room_id),
            weekday: patch.weekday.unwrap_or(self.weekday),
            date: self.date,
            start_time: patch.start_time.unwrap_or(self.start_time),
            end_time: patch.end_time.unwrap_or(self.end_time),
            class_type: patch.class_type.unwrap_or(self.class_type),
            color_code: patch.color_code.clone().or_else(|| self.color_code.clone()),
        }
    }
}

/// A bookable room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub capacity: u32,
    pub equipment: String,
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Data for a new occurrence row, passed to the store on creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOccurrence {
    pub title: String,
    pub teacher_id: TeacherId,
    pub room_id: RoomId,
    pub weekday: Weekday,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(with = "time_hm")]
    pub start_time: NaiveTime,
    #[serde(with = "time_hm")]
    pub end_time: NaiveTime,
    pub class_type: ClassType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_code: Option<String>,
}

/// Request to place a single weekly class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRequest {
    pub title: String,
    pub teacher_id: TeacherId,
    pub room_id: RoomId,
    pub weekday: Weekday,
    #[serde(with = "time_hm")]
    pub start_time: NaiveTime,
    #[serde(with = "time_hm")]
    pub end_time: NaiveTime,
    pub class_type: ClassType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_code: Option<String>,
}

impl ClassRequest {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(ScheduleError::Validation(
                "title must not be empty".to_string(),
            ));
        }
        if self.teacher_id.0.trim().is_empty() {
            return Err(ScheduleError::Validation(
                "teacher id must not be empty".to_string(),
            ));
        }
        check_time_window(self.start_time, self.end_time)
    }

    /// The slot this request proposes to occupy.
    pub fn slot(&self) -> ProposedSlot {
        ProposedSlot {
            teacher_id: self.teacher_id.clone(),
            room_id: self.room_id,
            weekday: self.weekday,
            date: None,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }

    pub(crate) fn to_new_occurrence(&self) -> NewOccurrence {
        NewOccurrence {
            title: self.title.clone(),
            teacher_id: self.teacher_id.clone(),
            room_id: self.room_id,
            weekday: self.weekday,
            date: None,
            start_time: self.start_time,
            end_time: self.end_time,
            class_type: self.class_type,
            color_code: self.color_code.clone(),
        }
    }
}

/// Partial update applied to an existing occurrence by a reschedule.
///
/// `None` fields keep their current value. Materialized dates are fixed: a
/// batch-created row stays on its calendar date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OccurrencePatch {
    pub title: Option<String>,
    pub teacher_id: Option<TeacherId>,
    pub room_id: Option<RoomId>,
    pub weekday: Option<Weekday>,
    #[serde(with = "time_hm_opt", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    #[serde(with = "time_hm_opt", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    pub class_type: Option<ClassType>,
    pub color_code: Option<String>,
}

/// The tuple handed to the conflict detector.
///
/// `date` is set when the proposal targets one concrete calendar date (a
/// batch-materialized occurrence); weekly proposals leave it `None` and
/// collide with anything on the weekday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedSlot {
    pub teacher_id: TeacherId,
    pub room_id: RoomId,
    pub weekday: Weekday,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(with = "time_hm")]
    pub start_time: NaiveTime,
    #[serde(with = "time_hm")]
    pub end_time: NaiveTime,
}

impl ProposedSlot {
    pub fn validate(&self) -> Result<()> {
        check_time_window(self.start_time, self.end_time)
    }
}

// ---------------------------------------------------------------------------
// Recurrence requests
// ---------------------------------------------------------------------------

/// Duration of a recurrence rule: a fixed number of weeks from the start
/// date, or an explicit inclusive end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecurrenceSpan {
    Weeks(u32),
    Until(NaiveDate),
}

/// A recurrence rule plus the class attributes copied onto every
/// materialized occurrence. Ephemeral input, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRequest {
    pub title: String,
    pub teacher_id: TeacherId,
    /// Room addressed by name; batch commit creates it with default
    /// attributes when it does not exist yet.
    pub room_name: String,
    pub weekdays: Vec<Weekday>,
    pub start_date: NaiveDate,
    pub span: RecurrenceSpan,
    #[serde(with = "time_hm")]
    pub daily_start_time: NaiveTime,
    #[serde(with = "time_hm")]
    pub daily_end_time: NaiveTime,
    pub class_type: ClassType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_code: Option<String>,
}

impl RecurrenceRequest {
    /// Validate the calendar rule alone. Previews run on this subset; the
    /// identity fields play no part in enumeration.
    pub fn validate_rule(&self) -> Result<()> {
        if self.weekdays.is_empty() {
            return Err(ScheduleError::Validation(
                "weekday list must not be empty".to_string(),
            ));
        }
        match self.span {
            RecurrenceSpan::Weeks(0) => {
                return Err(ScheduleError::Validation(
                    "number of weeks must be at least 1".to_string(),
                ));
            }
            RecurrenceSpan::Until(end) if end < self.start_date => {
                return Err(ScheduleError::Validation(format!(
                    "end date {} is before start date {}",
                    end, self.start_date
                )));
            }
            _ => {}
        }
        check_time_window(self.daily_start_time, self.daily_end_time)
    }

    /// Full validation, required before a commit.
    pub fn validate(&self) -> Result<()> {
        self.validate_rule()?;
        if self.title.trim().is_empty() {
            return Err(ScheduleError::Validation(
                "title must not be empty".to_string(),
            ));
        }
        if self.teacher_id.0.trim().is_empty() {
            return Err(ScheduleError::Validation(
                "teacher id must not be empty".to_string(),
            ));
        }
        if self.room_name.trim().is_empty() {
            return Err(ScheduleError::Validation(
                "room name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Last calendar date of the range, inclusive.
    pub fn end_date(&self) -> NaiveDate {
        match self.span {
            RecurrenceSpan::Weeks(weeks) => {
                self.start_date + Duration::days(7 * i64::from(weeks))
            }
            RecurrenceSpan::Until(end) => end,
        }
    }
}
