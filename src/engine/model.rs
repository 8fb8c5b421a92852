//! Cycle data model
//!
//! Entries, settings and the ordering used by every temporal query.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Default target cycle length in days
pub const DEFAULT_CYCLE_LENGTH: u32 = 28;

/// Default number of days an open cycle is presumed to occupy
pub const DEFAULT_PERIOD_DURATION: u32 = 4;

/// Opaque entry identifier: creation time in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub i64);

impl EntryId {
    /// Derive a fresh id from `now`, bumped past every id already in `logs`.
    #[must_use]
    pub fn next(logs: &[CycleEntry], now: DateTime<Utc>) -> Self {
        let candidate = now.timestamp_millis();
        let floor = logs
            .iter()
            .map(|e| e.id.0.saturating_add(1))
            .max()
            .unwrap_or(i64::MIN);
        Self(candidate.max(floor))
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One recorded cycle: a start date and, once concluded, an end date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleEntry {
    /// Stable identifier assigned at creation
    pub id: EntryId,
    /// First day of the cycle
    pub start: NaiveDate,
    /// Last day of the cycle; `None` while the cycle is still open
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

impl CycleEntry {
    /// Create an open entry starting on `start`
    #[must_use]
    pub const fn open(id: EntryId, start: NaiveDate) -> Self {
        Self {
            id,
            start,
            end: None,
        }
    }

    /// Whether the entry still lacks an end date
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Chronological order by start date; equal starts fall back to id,
    /// so the more recently created entry sorts later.
    #[must_use]
    pub fn chronological(&self, other: &Self) -> Ordering {
        self.start
            .cmp(&other.start)
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// Display mode. Not used by any cycle computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light palette
    #[default]
    Light,
    /// Dark palette
    Dark,
}

impl Theme {
    /// The other theme
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => f.write_str("light"),
            Self::Dark => f.write_str("dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => anyhow::bail!("Unknown theme '{other}': expected 'light' or 'dark'"),
        }
    }
}

/// User settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Target number of days between cycle starts
    #[serde(default = "default_cycle_length")]
    pub cycle_length: u32,
    /// Days an open cycle is presumed to last
    #[serde(default = "default_period_duration")]
    pub period_duration: u32,
    /// Display mode
    #[serde(default)]
    pub theme: Theme,
}

const fn default_cycle_length() -> u32 {
    DEFAULT_CYCLE_LENGTH
}

const fn default_period_duration() -> u32 {
    DEFAULT_PERIOD_DURATION
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cycle_length: DEFAULT_CYCLE_LENGTH,
            period_duration: DEFAULT_PERIOD_DURATION,
            theme: Theme::Light,
        }
    }
}

impl Settings {
    /// Replace zero lengths with their defaults
    #[must_use]
    pub const fn normalized(self) -> Self {
        Self {
            cycle_length: positive_or(self.cycle_length, DEFAULT_CYCLE_LENGTH),
            period_duration: positive_or(self.period_duration, DEFAULT_PERIOD_DURATION),
            theme: self.theme,
        }
    }

    /// Set the target cycle length; zero falls back to the default
    pub fn set_cycle_length(&mut self, days: u32) {
        self.cycle_length = positive_or(days, DEFAULT_CYCLE_LENGTH);
    }

    /// Set the presumed period duration; zero falls back to the default
    pub fn set_period_duration(&mut self, days: u32) {
        self.period_duration = positive_or(days, DEFAULT_PERIOD_DURATION);
    }

    /// Set the display theme
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Flip between light and dark, returning the new theme
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }
}

const fn positive_or(value: u32, fallback: u32) -> u32 {
    if value == 0 {
        fallback
    } else {
        value
    }
}
