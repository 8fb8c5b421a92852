//! Shared test utilities
//!
//! Common helpers used across test modules. Only compiled in test builds.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::engine::model::{CycleEntry, EntryId};

/// Parse a `YYYY-MM-DD` literal.
#[must_use]
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// A fixed clock reading for deterministic ids.
#[must_use]
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// Create an open entry with the given id and start date.
#[must_use]
pub fn open(id: i64, start: &str) -> CycleEntry {
    CycleEntry::open(EntryId(id), date(start))
}

/// Create a closed entry with the given id, start and end dates.
#[must_use]
pub fn closed(id: i64, start: &str, end: &str) -> CycleEntry {
    CycleEntry {
        id: EntryId(id),
        start: date(start),
        end: Some(date(end)),
    }
}
