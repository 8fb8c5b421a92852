//! Softly doctor: data-quality checks
//!
//! Inspects a loaded profile for states the tracker itself never produces
//! (hand-edited or imported documents) and explains how queries will treat
//! them. Findings are grouped as errors (must fix), warnings (should fix)
//! and info (suggestions).

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::engine::{active_cycle, CycleEntry};
use crate::store::Profile;

/// Severity level for a diagnostic finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Severity {
    /// Must fix, queries may give misleading answers
    Error,
    /// Should fix: handled but probably not what was meant
    Warning,
    /// Informational suggestion
    Info,
}

/// A single diagnostic finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Severity of the finding
    pub severity: Severity,
    /// Short code for the finding (e.g., "D001")
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Suggested fix (optional)
    pub suggestion: Option<String>,
}

/// Diagnostic report from `softly doctor`
#[derive(Debug, Clone)]
pub struct DiagnosticReport {
    /// All findings, in order of severity (errors first)
    pub findings: Vec<Finding>,
}

impl DiagnosticReport {
    /// Returns true if the report has no findings at all
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Returns the number of errors
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.count(&Severity::Error)
    }

    /// Returns the number of warnings
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.count(&Severity::Warning)
    }

    /// Returns the number of info items
    #[must_use]
    pub fn info_count(&self) -> usize {
        self.count(&Severity::Info)
    }

    fn count(&self, severity: &Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| &f.severity == severity)
            .count()
    }
}

/// Run all diagnostic checks and return a report.
#[must_use]
pub fn diagnose(profile: &Profile) -> DiagnosticReport {
    let mut findings = Vec::new();
    let logs = &profile.logs;

    check_open_entries(logs, &mut findings);
    check_inverted_ranges(logs, &mut findings);
    check_duplicate_starts(logs, &mut findings);
    check_duplicate_ids(logs, &mut findings);
    check_history_depth(logs, &mut findings);

    findings.sort_by_key(|f| match f.severity {
        Severity::Error => 0,
        Severity::Warning => 1,
        Severity::Info => 2,
    });

    DiagnosticReport { findings }
}

/// D001/D002: at most one open entry, and only the latest may be open
fn check_open_entries(logs: &[CycleEntry], findings: &mut Vec<Finding>) {
    let open: Vec<&CycleEntry> = logs.iter().filter(|e| e.is_open()).collect();

    if open.len() > 1 {
        findings.push(Finding {
            severity: Severity::Error,
            code: "D001".to_string(),
            message: format!(
                "{} entries have no end date; only one cycle can be in progress",
                open.len()
            ),
            suggestion: Some("Add end dates to all but the most recent entry.".to_string()),
        });
    }

    let active_id = active_cycle(logs).map(|e| e.id);
    for entry in open.iter().filter(|e| Some(e.id) != active_id) {
        findings.push(Finding {
            severity: Severity::Error,
            code: "D002".to_string(),
            message: format!(
                "Entry {} started {} has no end date but is not the latest entry",
                entry.id, entry.start
            ),
            suggestion: Some(
                "It is ignored when finding the active cycle; add its end date.".to_string(),
            ),
        });
    }
}

/// D003: end dates before their start
fn check_inverted_ranges(logs: &[CycleEntry], findings: &mut Vec<Finding>) {
    for entry in logs {
        if let Some(end) = entry.end.filter(|end| *end < entry.start) {
            findings.push(Finding {
                severity: Severity::Error,
                code: "D003".to_string(),
                message: format!(
                    "Entry {} ends on {end}, before it starts on {}",
                    entry.id, entry.start
                ),
                suggestion: Some("The entry covers no calendar days; fix its dates.".to_string()),
            });
        }
    }
}

/// D004: entries sharing a start date
fn check_duplicate_starts(logs: &[CycleEntry], findings: &mut Vec<Finding>) {
    let mut by_start: HashMap<NaiveDate, usize> = HashMap::new();
    for entry in logs {
        *by_start.entry(entry.start).or_insert(0) += 1;
    }

    let mut duplicated: Vec<(NaiveDate, usize)> =
        by_start.into_iter().filter(|(_, n)| *n > 1).collect();
    duplicated.sort_unstable();

    for (start, count) in duplicated {
        findings.push(Finding {
            severity: Severity::Warning,
            code: "D004".to_string(),
            message: format!("{count} entries start on {start}"),
            suggestion: Some(
                "The most recently created one is treated as the later entry.".to_string(),
            ),
        });
    }
}

/// D005: duplicate entry ids
fn check_duplicate_ids(logs: &[CycleEntry], findings: &mut Vec<Finding>) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for entry in logs {
        if !seen.insert(entry.id) && reported.insert(entry.id) {
            findings.push(Finding {
                severity: Severity::Warning,
                code: "D005".to_string(),
                message: format!("Entry id {} is used more than once", entry.id),
                suggestion: None,
            });
        }
    }
}

/// D006: not enough completed cycles for a status yet
fn check_history_depth(logs: &[CycleEntry], findings: &mut Vec<Finding>) {
    if logs.is_empty() {
        return;
    }
    let completed = logs.iter().filter(|e| !e.is_open()).count();
    if completed < 2 {
        findings.push(Finding {
            severity: Severity::Info,
            code: "D006".to_string(),
            message: format!(
                "{completed} completed cycle(s) logged; status needs at least two"
            ),
            suggestion: Some("Keep logging start and end dates.".to_string()),
        });
    }
}
