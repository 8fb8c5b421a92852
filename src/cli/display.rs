//! Terminal rendering for the tracker
//!
//! Every renderer returns a `String` so the binary decides where it goes
//! and tests can inspect it. Colors come from `colored`, which disables
//! itself when output is not a terminal.

use std::fmt::Write as _;

use colored::{ColoredString, Colorize};

use crate::doctor::{DiagnosticReport, Severity};
use crate::engine::calendar::WEEKDAY_HEADERS;
use crate::engine::{EntryPrompt, Insight, MonthCalendar, RecordOutcome, Settings, StatusKind};
use crate::log::{JournalAction, JournalEvent};
use crate::session::SyncState;

const RULE_WIDTH: usize = 34;

fn rule() -> String {
    "─".repeat(RULE_WIDTH).dimmed().to_string()
}

fn badge(kind: StatusKind) -> ColoredString {
    let text = format!(" {} ", kind.label());
    match kind {
        StatusKind::Normal => text.black().on_green().bold(),
        StatusKind::Early => text.black().on_cyan().bold(),
        StatusKind::Delayed => text.black().on_yellow().bold(),
    }
}

/// Opening phrase line
#[must_use]
pub fn render_phrase(phrase: &str) -> String {
    format!("\n  {}\n", phrase.italic().magenta())
}

/// Entry form: heading, question and the action to take
#[must_use]
pub fn render_entry_prompt(prompt: &EntryPrompt) -> String {
    format!(
        "{}\n  {} {}\n",
        prompt.heading.bold(),
        prompt.date_label.dimmed(),
        format!("(softly log → {})", prompt.action).dimmed()
    )
}

/// Status badge and the insight sentence
#[must_use]
pub fn render_insight(insight: &Insight) -> String {
    let mut out = String::new();
    if let Some(status) = insight.status {
        let _ = writeln!(
            out,
            "{}  {}",
            badge(status.kind),
            format!(
                "{} days between starts ({:+} vs target)",
                status.actual_length, status.variance
            )
            .dimmed()
        );
    }
    let _ = writeln!(out, "  {}", insight.message);
    out
}

fn calendar_cell(day: u32, is_today: bool, is_occupied: bool) -> String {
    let cell = match (is_today, is_occupied) {
        (true, _) => format!("[{day:>2}]"),
        (false, true) => format!(" {day:>2}•"),
        (false, false) => format!(" {day:>2} "),
    };
    if is_occupied {
        cell.red().bold().to_string()
    } else if is_today {
        cell.bold().to_string()
    } else {
        cell
    }
}

/// Month grid, Sunday first, with today bracketed and cycle days marked
#[must_use]
pub fn render_calendar(calendar: &MonthCalendar) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", calendar.title().bold());

    let header: String = WEEKDAY_HEADERS.iter().map(|d| format!("  {d} ")).collect();
    let _ = writeln!(out, "{}", header.dimmed());

    let mut column = calendar.leading_blanks;
    let mut line = "    ".repeat(usize::try_from(column).unwrap_or(0));
    for day in &calendar.days {
        line.push_str(&calendar_cell(day.day, day.is_today, day.is_occupied));
        column += 1;
        if column == 7 {
            let _ = writeln!(out, "{}", line.trim_end());
            line.clear();
            column = 0;
        }
    }
    if !line.is_empty() {
        let _ = writeln!(out, "{}", line.trim_end());
    }

    let _ = writeln!(
        out,
        "{}",
        format!("[ ] today   • cycle day ({} this month)", calendar.occupied_count()).dimmed()
    );
    out
}

/// Sync notice, with the underlying error when storage is degraded
#[must_use]
pub fn render_sync(state: SyncState, last_error: Option<&str>) -> String {
    let text = if state.is_degraded() {
        state.text().yellow().to_string()
    } else {
        state.text().green().to_string()
    };
    match last_error {
        Some(err) if state.is_degraded() => format!("{text} {}", format!("({err})").dimmed()),
        _ => text,
    }
}

/// Current settings
#[must_use]
pub fn render_settings(settings: &Settings) -> String {
    format!(
        "{}\n  {} {} days\n  {} {} days\n  {} {}\n",
        "Settings".bold(),
        "Cycle length:   ".dimmed(),
        settings.cycle_length,
        "Period duration:".dimmed(),
        settings.period_duration,
        "Theme:          ".dimmed(),
        settings.theme
    )
}

/// One-line confirmation of a recorded date
#[must_use]
pub fn render_outcome(outcome: &RecordOutcome) -> String {
    match outcome {
        RecordOutcome::Started { start, .. } => {
            format!("{} Cycle started on {start}", "✓".green().bold())
        }
        RecordOutcome::Ended { start, end, .. } => {
            format!(
                "{} Period from {start} concluded on {end}",
                "✓".green().bold()
            )
        }
        RecordOutcome::Rejected {
            start,
            attempted_end,
        } => format!(
            "{} {attempted_end} is before the current cycle started ({start}); nothing saved",
            "✗".red().bold()
        ),
    }
}

/// Journal lines, oldest first
#[must_use]
pub fn render_journal(events: &[JournalEvent]) -> String {
    if events.is_empty() {
        return format!("{}\n", "Journal is empty".dimmed());
    }
    let mut out = String::new();
    for event in events {
        let action = match event.action {
            JournalAction::Started => "started ".green(),
            JournalAction::Ended => "ended   ".cyan(),
            JournalAction::Rejected => "rejected".red(),
            JournalAction::Reset => "reset   ".yellow(),
            JournalAction::Settings => "settings".blue(),
        };
        let _ = writeln!(
            out,
            "{} {} {}",
            event.timestamp.format("%Y-%m-%d %H:%M").to_string().dimmed(),
            action,
            event.detail
        );
    }
    out
}

/// Doctor findings, errors first, followed by a summary line
#[must_use]
pub fn render_diagnostic_report(report: &DiagnosticReport) -> String {
    let mut out = String::new();
    if report.is_clean() {
        let _ = writeln!(out, "{} No issues found", "✓".green().bold());
        return out;
    }

    for finding in &report.findings {
        let tag = match finding.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
            Severity::Info => "info".blue().bold(),
        };
        let _ = writeln!(out, "{tag} [{}] {}", finding.code, finding.message);
        if let Some(suggestion) = &finding.suggestion {
            let _ = writeln!(out, "  {} {suggestion}", "→".dimmed());
        }
    }

    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(
        out,
        "{} error(s), {} warning(s), {} info",
        report.error_count(),
        report.warning_count(),
        report.info_count()
    );
    out
}
