//! Human-facing summaries of the log state
//!
//! Picks the wording for the entry form and the insight line under the
//! status badge.

use crate::engine::cycle::active_cycle;
use crate::engine::model::{CycleEntry, Settings};
use crate::engine::status::{classify_status, CycleStatus};

const WELCOME: &str = "Welcome home. Let's start by logging your first day.";
const IN_PROGRESS: &str = "Period in progress. Mark the end date when you're ready.";
const ONE_ENTRY: &str = "One entry logged. We'll start spotting patterns with your next one.";
const STORAGE_UNAVAILABLE: &str = "Unable to connect to your secure storage.";

/// Status badge (if any) plus the sentence shown beneath it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insight {
    /// Classification of the latest completed cycle
    pub status: Option<CycleStatus>,
    /// Sentence for the user
    pub message: &'static str,
}

impl Insight {
    /// Shown in place of the welcome when storage could not be set up
    #[must_use]
    pub const fn storage_unavailable() -> Self {
        Self {
            status: None,
            message: STORAGE_UNAVAILABLE,
        }
    }
}

/// Summarize the log for display
#[must_use]
pub fn describe(logs: &[CycleEntry], settings: &Settings) -> Insight {
    if let Some(status) = classify_status(logs, settings) {
        return Insight {
            status: Some(status),
            message: status.kind.message(),
        };
    }

    let message = if logs.is_empty() {
        WELCOME
    } else if active_cycle(logs).is_some() {
        IN_PROGRESS
    } else {
        ONE_ENTRY
    };

    Insight {
        status: None,
        message,
    }
}

/// Wording for the entry form, which either starts or concludes a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryPrompt {
    /// Form heading
    pub heading: &'static str,
    /// Question above the date field
    pub date_label: &'static str,
    /// Action button text
    pub action: &'static str,
}

impl EntryPrompt {
    /// Prompt for starting a new cycle
    pub const START: Self = Self {
        heading: "Start Cycle",
        date_label: "When did it begin?",
        action: "Log Start Date",
    };

    /// Prompt for concluding the active cycle
    pub const CONCLUDE: Self = Self {
        heading: "Conclude Period",
        date_label: "When did it end?",
        action: "Add Last Day",
    };

    /// The prompt matching the current log
    #[must_use]
    pub fn for_logs(logs: &[CycleEntry]) -> Self {
        if active_cycle(logs).is_some() {
            Self::CONCLUDE
        } else {
            Self::START
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::status::StatusKind;
    use crate::testutil::{closed, open};

    #[test]
    fn test_describe_empty_log_welcomes() {
        let insight = describe(&[], &Settings::default());
        assert!(insight.status.is_none());
        assert_eq!(insight.message, WELCOME);
    }

    #[test]
    fn test_describe_open_cycle() {
        let logs = vec![open(1, "2024-01-01")];
        let insight = describe(&logs, &Settings::default());
        assert!(insight.status.is_none());
        assert_eq!(insight.message, IN_PROGRESS);
    }

    #[test]
    fn test_describe_single_closed_entry() {
        let logs = vec![closed(1, "2024-01-01", "2024-01-05")];
        let insight = describe(&logs, &Settings::default());
        assert_eq!(insight.message, ONE_ENTRY);
    }

    #[test]
    fn test_describe_with_status_uses_kind_message() {
        let logs = vec![
            closed(1, "2024-01-01", "2024-01-05"),
            closed(2, "2024-02-05", "2024-02-09"),
        ];
        let insight = describe(&logs, &Settings::default());
        let status = insight.status.unwrap();
        assert_eq!(status.kind, StatusKind::Delayed);
        assert_eq!(insight.message, StatusKind::Delayed.message());
    }

    #[test]
    fn test_describe_status_outranks_open_cycle() {
        let logs = vec![
            closed(1, "2024-01-01", "2024-01-05"),
            closed(2, "2024-01-29", "2024-02-02"),
            open(3, "2024-02-26"),
        ];
        let insight = describe(&logs, &Settings::default());
        assert_eq!(insight.status.unwrap().kind, StatusKind::Normal);
    }

    #[test]
    fn test_storage_unavailable_insight() {
        let insight = Insight::storage_unavailable();
        assert!(insight.status.is_none());
        assert_eq!(insight.message, "Unable to connect to your secure storage.");
    }

    #[test]
    fn test_entry_prompt_follows_active_cycle() {
        assert_eq!(EntryPrompt::for_logs(&[]), EntryPrompt::START);
        assert_eq!(
            EntryPrompt::for_logs(&[open(1, "2024-01-01")]),
            EntryPrompt::CONCLUDE
        );
        assert_eq!(
            EntryPrompt::for_logs(&[closed(1, "2024-01-01", "2024-01-04")]),
            EntryPrompt::START
        );
    }
}
