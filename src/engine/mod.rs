//! Cycle engine
//!
//! Pure functions over an explicit log and settings: active cycle inference,
//! status classification, day occupancy and the mutations that keep the
//! log consistent. Clocks and randomness are always passed in.

pub mod calendar;
pub mod cycle;
pub mod insight;
pub mod model;
pub mod occupancy;
pub mod prompt;
pub mod status;

pub use calendar::{CalendarDay, MonthCalendar};
pub use cycle::{active_cycle, record_entry, reset_all, RecordOutcome};
pub use insight::{describe, EntryPrompt, Insight};
pub use model::{CycleEntry, EntryId, Settings, Theme};
pub use occupancy::{effective_end, is_day_occupied};
pub use prompt::{pick_prompt, SOOTHING_PHRASES};
pub use status::{classify_status, CycleStatus, StatusKind};
