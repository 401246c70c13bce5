//! WASM bindings for timetable-engine.
//!
//! Exposes recurrence preview, conflict checking, and batch commit to
//! JavaScript via `wasm-bindgen`. All complex types cross the boundary as
//! JSON strings in the engine's serde wire shapes (camelCase fields, `HH:MM`
//! times, full weekday names).
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p timetable-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/timetable_engine_wasm.wasm
//! ```

use timetable_engine::store::MemoryStore;
use timetable_engine::types::{Occurrence, OccurrenceId, ProposedSlot, RecurrenceRequest};
use wasm_bindgen::prelude::*;

/// Build an in-memory store from a JSON array of occurrence objects.
fn store_from_json(occurrences_json: &str) -> Result<MemoryStore, JsValue> {
    let occurrences: Vec<Occurrence> = serde_json::from_str(occurrences_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid occurrences JSON: {e}")))?;
    Ok(MemoryStore::with_occurrences(occurrences))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

fn engine_err(e: timetable_engine::ScheduleError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Expand a recurrence request into its dates and weekly breakdown, without
/// touching any store.
///
/// `request_json` must be a JSON object in the `RecurrenceRequest` wire shape.
/// Returns a JSON string with `dates`, `totalCount`, and `weeklyBreakdown`.
#[wasm_bindgen(js_name = "previewRecurrence")]
pub fn preview_recurrence(request_json: &str) -> Result<String, JsValue> {
    let request: RecurrenceRequest = serde_json::from_str(request_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid request JSON: {e}")))?;
    let preview = timetable_engine::preview_recurrence(&request).map_err(engine_err)?;
    to_json(&preview)
}

/// Check a proposed slot against a list of existing occurrences.
///
/// `occurrences_json` is a JSON array of occurrence objects, `proposed_json`
/// a JSON object in the `ProposedSlot` wire shape. `exclude_id` leaves one
/// occurrence out of the search (rescheduling). Returns a JSON conflict
/// report with `hasConflict`, `conflicts`, and `message`.
#[wasm_bindgen(js_name = "checkConflicts")]
pub fn check_conflicts(
    occurrences_json: &str,
    proposed_json: &str,
    exclude_id: Option<u32>,
) -> Result<String, JsValue> {
    let store = store_from_json(occurrences_json)?;
    let proposed: ProposedSlot = serde_json::from_str(proposed_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid proposed slot JSON: {e}")))?;
    proposed.validate().map_err(engine_err)?;

    let report = timetable_engine::check_conflicts(
        &store,
        &proposed,
        exclude_id.map(|id| OccurrenceId(u64::from(id))),
    )
    .map_err(engine_err)?;
    to_json(&report)
}

/// Expand a recurrence request and commit it against a list of existing
/// occurrences.
///
/// Returns a JSON batch outcome with `createdCount`, `totalCount`, `created`,
/// and `skipped`. The caller's occurrence list is not modified; the created
/// rows come back in the outcome.
#[wasm_bindgen(js_name = "commitRecurrence")]
pub fn commit_recurrence(
    occurrences_json: &str,
    request_json: &str,
) -> Result<String, JsValue> {
    let mut store = store_from_json(occurrences_json)?;
    let request: RecurrenceRequest = serde_json::from_str(request_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid request JSON: {e}")))?;
    let outcome = timetable_engine::commit_recurrence(&mut store, &request).map_err(engine_err)?;
    to_json(&outcome)
}
