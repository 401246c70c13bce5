//! Integration tests for the `timetable` CLI binary.
//!
//! These use `assert_cmd` and `predicates` to exercise the preview, check,
//! commit, and free subcommands through the actual binary, including store
//! file round trips and error surfacing.

use assert_cmd::Command;
use predicates::prelude::*;

fn timetable() -> Command {
    Command::cargo_bin("timetable").unwrap()
}

/// Fresh per-test store path under /tmp, cleaned of any prior run.
fn store_path(name: &str) -> String {
    let path = format!("/tmp/timetable-test-{name}.json");
    let _ = std::fs::remove_file(&path);
    path
}

// ─────────────────────────────────────────────────────────────────────────────
// Preview subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn preview_enumerates_dates() {
    // 2026-03-01 is a Sunday; two weeks of Mon+Wed yield four dates.
    timetable()
        .args([
            "preview",
            "--weekdays",
            "monday,wednesday",
            "--start-date",
            "2026-03-01",
            "--weeks",
            "2",
            "--from",
            "10:00",
            "--to",
            "11:00",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Enumerated 4 date(s)"))
        .stdout(predicate::str::contains("2026-03-02  Monday"))
        .stdout(predicate::str::contains("2026-03-11  Wednesday"))
        .stdout(predicate::str::contains("week of 2026-03-02: 2"));
}

#[test]
fn preview_json_output_is_parseable() {
    let output = timetable()
        .args([
            "preview",
            "--weekdays",
            "monday,wednesday",
            "--start-date",
            "2026-03-01",
            "--weeks",
            "2",
            "--from",
            "10:00",
            "--to",
            "11:00",
            "--json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["totalCount"], 4);
    assert_eq!(value["dates"][0]["date"], "2026-03-02");
    assert_eq!(value["dates"][0]["weekday"], "Monday");
}

#[test]
fn preview_rejects_unknown_weekday() {
    timetable()
        .args([
            "preview",
            "--weekdays",
            "someday",
            "--start-date",
            "2026-03-01",
            "--weeks",
            "2",
            "--from",
            "10:00",
            "--to",
            "11:00",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown weekday"));
}

#[test]
fn preview_rejects_zero_weeks() {
    timetable()
        .args([
            "preview",
            "--weekdays",
            "monday",
            "--start-date",
            "2026-03-01",
            "--weeks",
            "0",
            "--from",
            "10:00",
            "--to",
            "11:00",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("number of weeks"));
}

#[test]
fn preview_requires_a_duration_mode() {
    timetable()
        .args([
            "preview",
            "--weekdays",
            "monday",
            "--start-date",
            "2026-03-01",
            "--from",
            "10:00",
            "--to",
            "11:00",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--weeks or --end-date"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Commit and check round trip
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn commit_then_check_round_trip() {
    let store = store_path("round-trip");

    timetable()
        .args([
            "commit",
            "--store",
            store.as_str(),
            "--title",
            "Salsa Beginners",
            "--teacher",
            "t-veronica",
            "--room",
            "Studio A",
            "--weekdays",
            "tuesday",
            "--start-date",
            "2026-03-01",
            "--weeks",
            "2",
            "--from",
            "19:00",
            "--to",
            "20:30",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created 2 of 2 occurrence(s)"));

    // The auto-created room got id 1; the teacher now collides on Tuesdays.
    timetable()
        .args([
            "check",
            "--store",
            store.as_str(),
            "--teacher",
            "t-veronica",
            "--room-id",
            "1",
            "--weekday",
            "tuesday",
            "--from",
            "20:00",
            "--to",
            "21:00",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Teacher is already scheduled"))
        .stdout(predicate::str::contains("Salsa Beginners"));

    // A different teacher and room on the same weekday is clear.
    timetable()
        .args([
            "check",
            "--store",
            store.as_str(),
            "--teacher",
            "t-other",
            "--room-id",
            "2",
            "--weekday",
            "tuesday",
            "--from",
            "20:00",
            "--to",
            "21:00",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No conflicts."));
}

#[test]
fn commit_reports_skipped_dates() {
    let store = store_path("skipped");

    let commit = |from: &str, to: &str| {
        timetable()
            .args([
                "commit",
                "--store",
                store.as_str(),
                "--title",
                "Salsa Beginners",
                "--teacher",
                "t-veronica",
                "--room",
                "Studio A",
                "--weekdays",
                "tuesday",
                "--start-date",
                "2026-03-01",
                "--weeks",
                "2",
                "--from",
                from,
                "--to",
                to,
            ])
            .assert()
    };

    commit("19:00", "20:30").success();

    // The identical batch collides on every date the first one created.
    commit("19:00", "20:30")
        .success()
        .stdout(predicate::str::contains("Created 0 of 2 occurrence(s)"))
        .stdout(predicate::str::contains("skipped 2026-03-03 (Tuesday)"));
}

#[test]
fn commit_json_reports_counts() {
    let store = store_path("commit-json");

    let output = timetable()
        .args([
            "commit",
            "--store",
            store.as_str(),
            "--title",
            "Salsa Beginners",
            "--teacher",
            "t-veronica",
            "--room",
            "Studio A",
            "--weekdays",
            "monday,wednesday",
            "--start-date",
            "2026-03-01",
            "--weeks",
            "2",
            "--from",
            "19:00",
            "--to",
            "20:30",
            "--json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["createdCount"], 4);
    assert_eq!(value["totalCount"], 4);
    assert_eq!(value["created"][0]["date"], "2026-03-02");
    assert_eq!(value["created"][0]["teacherId"], "t-veronica");
}

#[test]
fn check_fails_without_a_store_file() {
    timetable()
        .args([
            "check",
            "--store",
            "/tmp/timetable-test-does-not-exist.json",
            "--teacher",
            "t-veronica",
            "--room-id",
            "1",
            "--weekday",
            "tuesday",
            "--from",
            "10:00",
            "--to",
            "11:00",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read store file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Free subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn free_lists_gaps_around_bookings() {
    let store = store_path("free");

    timetable()
        .args([
            "commit",
            "--store",
            store.as_str(),
            "--title",
            "Salsa Beginners",
            "--teacher",
            "t-veronica",
            "--room",
            "Studio A",
            "--weekdays",
            "tuesday",
            "--start-date",
            "2026-03-01",
            "--weeks",
            "1",
            "--from",
            "10:00",
            "--to",
            "11:00",
        ])
        .assert()
        .success();

    timetable()
        .args([
            "free",
            "--store",
            store.as_str(),
            "--room-id",
            "1",
            "--weekday",
            "tuesday",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("08:00-10:00  (120 min)"))
        .stdout(predicate::str::contains("11:00-20:00  (540 min)"));
}

#[test]
fn free_requires_exactly_one_resource() {
    timetable()
        .args([
            "free",
            "--store",
            "/tmp/timetable-test-free-none.json",
            "--weekday",
            "tuesday",
        ])
        .assert()
        .failure();
}
