//! Softly - A gentle cycle tracker
//!
//! Softly records the start and end dates of recurring cycles, works out
//! which cycle is still open, classifies the latest completed cycle against
//! a target length and projects cycle days onto a month calendar. The
//! engine is pure; storage and identity sit behind small async traits.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

pub mod cli;
pub mod config;
pub mod doctor;
pub mod engine;
pub mod log;
pub mod session;
pub mod store;

#[cfg(test)]
pub mod testutil;

// Re-export commonly used types
pub use config::AppConfig;
pub use doctor::{diagnose, DiagnosticReport};
pub use engine::{
    active_cycle, classify_status, is_day_occupied, pick_prompt, record_entry, reset_all,
    CycleEntry, CycleStatus, EntryId, MonthCalendar, RecordOutcome, Settings, StatusKind, Theme,
};
pub use log::{Journal, JournalEvent};
pub use session::{Session, SyncState};
pub use store::{DocumentStore, FileStore, Identity, IdentityProvider, MemoryStore, Profile};
