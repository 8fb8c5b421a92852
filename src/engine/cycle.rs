//! Active cycle inference and log mutations
//!
//! The log collection is kept in insertion order. Every query sorts on demand,
//! and at most one entry (the latest-started one) is ever left open.

use chrono::{DateTime, NaiveDate, Utc};

use crate::engine::model::{CycleEntry, EntryId};

/// Result of recording a date against the log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// A new open entry was created
    Started {
        /// Id of the new entry
        id: EntryId,
        /// Its start date
        start: NaiveDate,
    },
    /// The active entry was closed
    Ended {
        /// Id of the closed entry
        id: EntryId,
        /// The entry's start date
        start: NaiveDate,
        /// The recorded end date
        end: NaiveDate,
    },
    /// The date would end the active cycle before it began; nothing changed
    Rejected {
        /// Start of the active entry
        start: NaiveDate,
        /// The rejected end date
        attempted_end: NaiveDate,
    },
}

impl RecordOutcome {
    /// Whether the log was changed
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        !matches!(self, Self::Rejected { .. })
    }
}

/// The currently open cycle, if any.
///
/// Only the latest-started entry can be active. When two entries share a
/// start date the one with the larger id counts as the later one.
#[must_use]
pub fn active_cycle(logs: &[CycleEntry]) -> Option<&CycleEntry> {
    logs.iter()
        .max_by(|a, b| a.chronological(b))
        .filter(|latest| latest.is_open())
}

fn active_index(logs: &[CycleEntry]) -> Option<usize> {
    logs.iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.chronological(b))
        .filter(|(_, latest)| latest.is_open())
        .map(|(i, _)| i)
}

/// Record a date: close the active cycle if there is one, otherwise start a
/// new cycle on `date`.
///
/// Closing with a date before the active cycle's start is rejected and leaves
/// `logs` untouched. `now` is only used to mint the new entry's id.
pub fn record_entry(
    logs: &mut Vec<CycleEntry>,
    date: NaiveDate,
    now: DateTime<Utc>,
) -> RecordOutcome {
    if let Some(index) = active_index(logs) {
        let active = &mut logs[index];
        if date < active.start {
            return RecordOutcome::Rejected {
                start: active.start,
                attempted_end: date,
            };
        }
        active.end = Some(date);
        return RecordOutcome::Ended {
            id: active.id,
            start: active.start,
            end: date,
        };
    }

    let id = EntryId::next(logs, now);
    logs.push(CycleEntry::open(id, date));
    RecordOutcome::Started { id, start: date }
}

/// Drop every entry. Settings live elsewhere and are not touched.
pub fn reset_all(logs: &mut Vec<CycleEntry>) {
    logs.clear();
}
