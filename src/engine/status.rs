//! Cycle status classification
//!
//! Compares the start-to-start interval of the two most recent completed
//! cycles against the target cycle length. An in-progress cycle is never
//! measured.

use serde::{Deserialize, Serialize};

use crate::engine::model::{CycleEntry, Settings};

/// Days either side of the target still counted as normal
pub const TOLERANCE_DAYS: i64 = 2;

/// How the latest completed cycle compares to the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    /// Within the tolerance band
    Normal,
    /// Shorter than target by more than the tolerance
    Early,
    /// Longer than target by more than the tolerance
    Delayed,
}

impl StatusKind {
    /// Classify a variance (actual minus target, in days)
    #[must_use]
    pub const fn from_variance(variance: i64) -> Self {
        if variance.abs() <= TOLERANCE_DAYS {
            Self::Normal
        } else if variance < 0 {
            Self::Early
        } else {
            Self::Delayed
        }
    }

    /// Short badge label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Early => "Early",
            Self::Delayed => "Delayed",
        }
    }

    /// Explanatory message shown next to the badge
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Normal => "Your cycle is flowing steadily and predictably.",
            Self::Early => {
                "A little earlier than expected. This is a natural part of your body's variety."
            }
            Self::Delayed => "Taking its time this month. Nature doesn't always follow a clock.",
        }
    }
}

/// Classification of the most recent completed cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleStatus {
    /// Early, normal or delayed
    pub kind: StatusKind,
    /// Days between the two latest completed cycle starts
    pub actual_length: i64,
    /// `actual_length` minus the target length
    pub variance: i64,
}

/// Classify the latest completed cycle, or `None` without enough history.
///
/// Needs two entries overall and at least two with an end date.
#[must_use]
pub fn classify_status(logs: &[CycleEntry], settings: &Settings) -> Option<CycleStatus> {
    if logs.len() < 2 {
        return None;
    }

    let mut completed: Vec<&CycleEntry> = logs.iter().filter(|e| !e.is_open()).collect();
    if completed.len() < 2 {
        return None;
    }
    completed.sort_by(|a, b| b.chronological(a));

    let latest = completed[0].start;
    let previous = completed[1].start;
    let actual_length = latest.signed_duration_since(previous).num_days().abs();
    let variance = actual_length - i64::from(settings.cycle_length);

    Some(CycleStatus {
        kind: StatusKind::from_variance(variance),
        actual_length,
        variance,
    })
}
