//! CLI output formatting
//!
//! Provides human-readable terminal display for the tracker: status badge,
//! month calendar, settings, journal and doctor reports.

pub mod display;

pub use display::render_calendar;
pub use display::render_diagnostic_report;
pub use display::render_insight;
pub use display::render_sync;
