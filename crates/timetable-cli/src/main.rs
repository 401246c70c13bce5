//! `timetable` CLI — preview recurrence rules, check conflicts, and commit
//! batches against a JSON schedule store.
//!
//! ## Usage
//!
//! ```sh
//! # Enumerate the dates a rule would produce (no store involved)
//! timetable preview --weekdays monday,wednesday --start-date 2026-03-01 \
//!   --weeks 2 --from 10:00 --to 11:00
//!
//! # Check a proposed slot against an existing schedule
//! timetable check --store schedule.json --teacher t-veronica --room-id 1 \
//!   --weekday tuesday --from 10:00 --to 11:30
//!
//! # Expand a rule and commit the non-conflicting dates
//! timetable commit --store schedule.json --title "Salsa Beginners" \
//!   --teacher t-veronica --room "Studio A" --weekdays tuesday,thursday \
//!   --start-date 2026-03-01 --weeks 4 --from 19:00 --to 20:30
//!
//! # List free windows for a room on a weekday
//! timetable free --store schedule.json --room-id 1 --weekday tuesday
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand};
use timetable_engine::conflict::check_conflicts;
use timetable_engine::free::{free_windows, Resource};
use timetable_engine::recurrence::{commit_recurrence, preview_recurrence};
use timetable_engine::store::MemoryStore;
use timetable_engine::types::{
    ClassType, OccurrenceId, ProposedSlot, RecurrenceRequest, RecurrenceSpan, RoomId, TeacherId,
    Weekday,
};

#[derive(Parser)]
#[command(
    name = "timetable",
    version,
    about = "Weekly class scheduling: recurrence preview, conflict checks, batch commit"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Recurrence-rule flags shared by `preview` and `commit`.
#[derive(Args)]
struct RuleArgs {
    /// Comma-separated weekday names, e.g. "monday,wednesday"
    #[arg(long)]
    weekdays: String,
    /// First calendar date of the range (YYYY-MM-DD)
    #[arg(long)]
    start_date: String,
    /// Number of weeks to repeat for
    #[arg(long, conflicts_with = "end_date")]
    weeks: Option<u32>,
    /// Last calendar date of the range, inclusive (YYYY-MM-DD)
    #[arg(long)]
    end_date: Option<String>,
    /// Daily window start (HH:MM)
    #[arg(long)]
    from: String,
    /// Daily window end (HH:MM)
    #[arg(long)]
    to: String,
}

impl RuleArgs {
    fn span(&self) -> Result<RecurrenceSpan> {
        match (self.weeks, &self.end_date) {
            (Some(weeks), None) => Ok(RecurrenceSpan::Weeks(weeks)),
            (None, Some(end)) => Ok(RecurrenceSpan::Until(parse_date(end)?)),
            (None, None) => bail!("one of --weeks or --end-date is required"),
            (Some(_), Some(_)) => unreachable!("clap rejects the combination"),
        }
    }

    fn weekday_list(&self) -> Result<Vec<Weekday>> {
        self.weekdays
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| Ok(s.parse::<Weekday>()?))
            .collect()
    }

    fn into_request(
        &self,
        title: String,
        teacher: String,
        room_name: String,
        class_type: ClassType,
        color_code: Option<String>,
    ) -> Result<RecurrenceRequest> {
        Ok(RecurrenceRequest {
            title,
            teacher_id: TeacherId::new(teacher),
            room_name,
            weekdays: self.weekday_list()?,
            start_date: parse_date(&self.start_date)?,
            span: self.span()?,
            daily_start_time: parse_time(&self.from)?,
            daily_end_time: parse_time(&self.to)?,
            class_type,
            color_code,
        })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Enumerate the dates a recurrence rule would produce (read-only)
    Preview {
        #[command(flatten)]
        rule: RuleArgs,
        /// Emit the preview as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check a proposed slot for teacher and room conflicts
    Check {
        /// Path to the JSON schedule store
        #[arg(short, long)]
        store: PathBuf,
        /// Teacher identifier of the proposed slot
        #[arg(long)]
        teacher: String,
        /// Room identifier of the proposed slot
        #[arg(long)]
        room_id: u64,
        /// Weekday of the proposed slot
        #[arg(long)]
        weekday: String,
        /// Slot start (HH:MM)
        #[arg(long)]
        from: String,
        /// Slot end (HH:MM)
        #[arg(long)]
        to: String,
        /// Occurrence id to leave out of the search (rescheduling)
        #[arg(long)]
        exclude: Option<u64>,
        /// Emit the full conflict report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Expand a recurrence rule and commit the non-conflicting dates
    Commit {
        /// Path to the JSON schedule store (created when missing)
        #[arg(short, long)]
        store: PathBuf,
        #[command(flatten)]
        rule: RuleArgs,
        /// Class title copied onto every created occurrence
        #[arg(long)]
        title: String,
        /// Teacher identifier
        #[arg(long)]
        teacher: String,
        /// Room name (created with default attributes when missing)
        #[arg(long)]
        room: String,
        /// Class type: group or private
        #[arg(long, default_value = "group")]
        class_type: String,
        /// Display color tag
        #[arg(long)]
        color: Option<String>,
        /// Emit the batch outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// List free windows for a room or a teacher on a weekday
    Free {
        /// Path to the JSON schedule store
        #[arg(short, long)]
        store: PathBuf,
        /// Room identifier
        #[arg(long, conflicts_with = "teacher")]
        room_id: Option<u64>,
        /// Teacher identifier
        #[arg(long)]
        teacher: Option<String>,
        /// Weekday to inspect
        #[arg(long)]
        weekday: String,
        /// Window start (HH:MM)
        #[arg(long, default_value = "08:00")]
        from: String,
        /// Window end (HH:MM)
        #[arg(long, default_value = "20:00")]
        to: String,
    },
}

fn main() -> Result<()> {
    match Cli::parse().command {
        Commands::Preview { rule, json } => run_preview(&rule, json),
        Commands::Check {
            store,
            teacher,
            room_id,
            weekday,
            from,
            to,
            exclude,
            json,
        } => run_check(&store, &teacher, room_id, &weekday, &from, &to, exclude, json),
        Commands::Commit {
            store,
            rule,
            title,
            teacher,
            room,
            class_type,
            color,
            json,
        } => run_commit(&store, &rule, title, teacher, room, &class_type, color, json),
        Commands::Free {
            store,
            room_id,
            teacher,
            weekday,
            from,
            to,
        } => run_free(&store, room_id, teacher, &weekday, &from, &to),
    }
}

fn run_preview(rule: &RuleArgs, json: bool) -> Result<()> {
    // Identity fields play no part in enumeration; previews leave them empty.
    let request = rule.into_request(
        String::new(),
        String::new(),
        String::new(),
        ClassType::Group,
        None,
    )?;
    let preview = preview_recurrence(&request)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&preview)?);
        return Ok(());
    }

    println!(
        "Enumerated {} date(s) from {} to {}",
        preview.total_count,
        request.start_date,
        request.end_date()
    );
    for planned in &preview.dates {
        println!("  {}  {}", planned.date, planned.weekday);
    }
    if !preview.weekly_breakdown.is_empty() {
        println!("Per week:");
        for bucket in &preview.weekly_breakdown {
            println!("  week of {}: {}", bucket.week_start, bucket.count);
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_check(
    store_path: &Path,
    teacher: &str,
    room_id: u64,
    weekday: &str,
    from: &str,
    to: &str,
    exclude: Option<u64>,
    json: bool,
) -> Result<()> {
    let store = load_store(store_path)?;
    let proposed = ProposedSlot {
        teacher_id: TeacherId::new(teacher),
        room_id: RoomId(room_id),
        weekday: weekday.parse()?,
        date: None,
        start_time: parse_time(from)?,
        end_time: parse_time(to)?,
    };
    proposed.validate()?;

    let report = check_conflicts(&store, &proposed, exclude.map(OccurrenceId))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if !report.has_conflict {
        println!("No conflicts.");
        return Ok(());
    }
    println!("{}", report.message);
    for conflict in &report.conflicts {
        let occurrence = &conflict.conflicting_occurrence;
        println!(
            "  {}  \"{}\"  {}-{}  (occurrence {})",
            conflict.kind,
            occurrence.title,
            occurrence.start_time.format("%H:%M"),
            occurrence.end_time.format("%H:%M"),
            occurrence.id
        );
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_commit(
    store_path: &Path,
    rule: &RuleArgs,
    title: String,
    teacher: String,
    room: String,
    class_type: &str,
    color: Option<String>,
    json: bool,
) -> Result<()> {
    let mut store = if store_path.exists() {
        load_store(store_path)?
    } else {
        MemoryStore::new()
    };

    let request = rule.into_request(title, teacher, room, class_type.parse()?, color)?;
    let outcome = commit_recurrence(&mut store, &request)?;
    save_store(store_path, &store)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!(
        "Created {} of {} occurrence(s)",
        outcome.created_count, outcome.total_count
    );
    for skip in &outcome.skipped {
        println!("  skipped {} ({}): {}", skip.date, skip.weekday, skip.reason);
    }
    Ok(())
}

fn run_free(
    store_path: &Path,
    room_id: Option<u64>,
    teacher: Option<String>,
    weekday: &str,
    from: &str,
    to: &str,
) -> Result<()> {
    let store = load_store(store_path)?;
    let resource = match (room_id, teacher) {
        (Some(id), None) => Resource::Room(RoomId(id)),
        (None, Some(teacher)) => Resource::Teacher(TeacherId::new(teacher)),
        _ => bail!("exactly one of --room-id or --teacher is required"),
    };

    let windows = free_windows(
        &store,
        &resource,
        weekday.parse()?,
        parse_time(from)?,
        parse_time(to)?,
    )?;

    if windows.is_empty() {
        println!("No free windows.");
        return Ok(());
    }
    for window in &windows {
        println!(
            "  {}-{}  ({} min)",
            window.start.format("%H:%M"),
            window.end.format("%H:%M"),
            window.duration_minutes
        );
    }
    Ok(())
}

fn load_store(path: &Path) -> Result<MemoryStore> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read store file: {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Store file is not valid JSON: {}", path.display()))
}

fn save_store(path: &Path, store: &MemoryStore) -> Result<()> {
    let raw = serde_json::to_string_pretty(store)?;
    fs::write(path, raw).with_context(|| format!("Failed to write store file: {}", path.display()))
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{s}', expected YYYY-MM-DD"))
}

fn parse_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .with_context(|| format!("Invalid time '{s}', expected HH:MM"))
}
