pub mod store;
pub mod validate;

pub use store::TaskStore;

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

// ─── Row types ────────────────────────────────────────────────────────────────

/// A persisted Task. Serializing this struct is the wire representation:
/// all six fields, `description` as `null` when absent, timestamps as the
/// stored ISO-8601 strings.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
pub struct TaskRow {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// The validated mutable fields of a Task — what a create inserts and what a
/// full update replaces. Produced only by `validate::validate_task_body`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

/// Optional listing filters. All unset = every task, newest first.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TaskListParams {
    /// Exact match on the completed flag.
    pub completed: Option<bool>,
    /// Case-insensitive substring search over title and description.
    pub search: Option<String>,
    /// Inclusive `YYYY-MM-DD` bounds on the creation date.
    pub created_after: Option<String>,
    pub created_before: Option<String>,
    /// Inclusive `YYYY-MM-DD` bounds on the last-update date.
    pub updated_after: Option<String>,
    pub updated_before: Option<String>,
}

// ─── Timestamps ───────────────────────────────────────────────────────────────

/// Current UTC time as fixed-precision RFC 3339 (microseconds, `Z` suffix).
/// Fixed width keeps lexicographic TEXT ordering chronological.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// A timestamp strictly after `prev`: the current time, or `prev + 1µs` when
/// the rendered clock has not advanced past it. Keeps `updated_at` strictly
/// increasing across successive updates of the same row. The comparison is on
/// the rendered form — the stored strings are what ordering is defined over.
pub fn rfc3339_after(prev: &str) -> String {
    let now = now_rfc3339();
    if now.as_str() > prev {
        return now;
    }
    match DateTime::parse_from_rfc3339(prev) {
        Ok(t) => (t.with_timezone(&Utc) + Duration::microseconds(1))
            .to_rfc3339_opts(SecondsFormat::Micros, true),
        Err(_) => now,
    }
}
