//! JSONL (JSON Lines) activity journal
//!
//! Provides append-only logging of tracker changes to `<data_dir>/journal.jsonl`

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use crate::engine::RecordOutcome;

/// Kind of change recorded in the journal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JournalAction {
    /// A cycle was started
    Started,
    /// The active cycle was concluded
    Ended,
    /// A date was refused
    Rejected,
    /// All entries were erased
    Reset,
    /// Settings changed
    Settings,
}

/// One journal line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JournalEvent {
    /// When the change happened
    pub timestamp: DateTime<Utc>,
    /// What kind of change it was
    pub action: JournalAction,
    /// Human-readable detail
    pub detail: String,
}

impl JournalEvent {
    /// Describe the outcome of recording a date
    #[must_use]
    pub fn from_outcome(outcome: &RecordOutcome, timestamp: DateTime<Utc>) -> Self {
        let (action, detail) = match outcome {
            RecordOutcome::Started { id, start } => {
                (JournalAction::Started, format!("Entry {id} started on {start}"))
            }
            RecordOutcome::Ended { id, start, end } => (
                JournalAction::Ended,
                format!("Entry {id} ({start}) ended on {end}"),
            ),
            RecordOutcome::Rejected {
                start,
                attempted_end,
            } => (
                JournalAction::Rejected,
                format!("End date {attempted_end} is before start {start}"),
            ),
        };
        Self {
            timestamp,
            action,
            detail,
        }
    }

    /// An event with free-form detail
    #[must_use]
    pub fn new(action: JournalAction, detail: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            action,
            detail: detail.to_string(),
        }
    }
}

/// JSONL journal of tracker changes
///
/// Each line is a JSON object representing a single [`JournalEvent`].
#[derive(Debug, Clone)]
pub struct Journal {
    path: PathBuf,
}

impl Journal {
    /// Create a journal in `dir`, creating the directory if needed
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();

        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create journal directory: {}", dir.display()))?;

        Ok(Self {
            path: dir.join("journal.jsonl"),
        })
    }

    /// A handle on the journal in `dir` that touches nothing on disk.
    ///
    /// Used for reading when the journal was not opened for writing.
    #[must_use]
    pub fn at<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            path: dir.as_ref().join("journal.jsonl"),
        }
    }

    /// Append an event
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or written
    pub fn append(&self, event: &JournalEvent) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open journal: {}", self.path.display()))?;

        let json = serde_json::to_string(event).context("Failed to serialize journal event")?;

        writeln!(file, "{json}").context("Failed to write to journal")?;

        Ok(())
    }

    /// Read every event, oldest first
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or a line is not valid JSON
    pub fn read_all(&self) -> Result<Vec<JournalEvent>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read journal: {}", self.path.display()))?;

        let mut events = Vec::new();
        for (line_num, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let event: JournalEvent = serde_json::from_str(line)
                .with_context(|| format!("Failed to parse line {} as JSON", line_num + 1))?;
            events.push(event);
        }

        Ok(events)
    }

    /// Path to the journal file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
