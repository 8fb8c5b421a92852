//! Softly - A gentle cycle tracker
//!
//! CLI entry point for the tracker.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{Datelike, Local, NaiveDate, Utc};
use clap::{Parser, Subcommand};

use softly::cli::display;
use softly::config::AppConfig;
use softly::doctor::diagnose;
use softly::engine::{pick_prompt, RecordOutcome, Theme, SOOTHING_PHRASES};
use softly::log::{Journal, JournalAction, JournalEvent};
use softly::session::Session;
use softly::store::{FileStore, IdentitySource};

/// A gentle cycle tracker
///
/// Logs cycle start and end dates, compares the latest cycle to your target
/// length and shows a calendar of cycle days.
#[derive(Parser, Debug)]
#[command(name = "softly", version, about)]
struct Cli {
    /// Path to the softly.toml configuration file
    #[arg(long, global = true, default_value = "softly.toml")]
    config: PathBuf,

    /// Directory for profiles and the journal (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Pre-provisioned identity token (overrides the config file)
    #[arg(long, global = true)]
    auth_token: Option<String>,

    /// Skip storage entirely and work in memory
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the current status, insight and this month's calendar
    Status,
    /// Log a start date, or the last day of the cycle in progress
    Log {
        /// Date as YYYY-MM-DD (defaults to today)
        date: Option<NaiveDate>,
    },
    /// Show a month calendar
    Calendar {
        /// Month as YYYY-MM (defaults to the current month)
        #[arg(long, value_parser = parse_month)]
        month: Option<(i32, u32)>,
    },
    /// Show or change settings
    Settings {
        /// Target days between cycle starts
        #[arg(long)]
        cycle_length: Option<u32>,
        /// Days a cycle is presumed to last before its end is logged
        #[arg(long)]
        period_duration: Option<u32>,
        /// Display theme (light or dark)
        #[arg(long, conflicts_with = "toggle_theme")]
        theme: Option<Theme>,
        /// Switch between light and dark
        #[arg(long)]
        toggle_theme: bool,
    },
    /// Erase all logged cycles (settings are kept)
    Reset {
        /// Do not ask for confirmation
        #[arg(long)]
        yes: bool,
    },
    /// Check stored data for problems
    Doctor,
    /// Show the activity journal
    History,
}

/// Parse `YYYY-MM` into a year and month.
fn parse_month(s: &str) -> Result<(i32, u32)> {
    let (year, month) = s
        .split_once('-')
        .with_context(|| format!("Expected YYYY-MM, got '{s}'"))?;
    let year: i32 = year
        .parse()
        .with_context(|| format!("Invalid year in '{s}'"))?;
    let month: u32 = month
        .parse()
        .with_context(|| format!("Invalid month in '{s}'"))?;
    if !(1..=12).contains(&month) {
        bail!("Month must be between 1 and 12, got {month}");
    }
    Ok((year, month))
}

/// Append to the journal; failures are reported but never stop the command.
fn journal_append(journal: Option<&Journal>, event: &JournalEvent) {
    if let Some(journal) = journal {
        if let Err(err) = journal.append(event) {
            eprintln!("Warning: failed to write journal: {err:#}");
        }
    }
}

/// The journal to read for `history`: the open one, or a read-only handle
/// on `data_dir` when running offline.
fn history_journal(journal: Option<&Journal>, data_dir: &Path) -> Journal {
    journal.cloned().unwrap_or_else(|| Journal::at(data_dir))
}

/// Ask a yes/no question on stdin, defaulting to no.
fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    std::io::stdout().flush().context("Failed to flush stdout")?;
    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read answer")?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

async fn open_session(cli: &Cli, config: &AppConfig) -> Session<FileStore> {
    let defaults = config.defaults.settings();
    if cli.offline {
        return Session::local(defaults);
    }

    let store = match FileStore::new(&config.data_dir, &config.app_id) {
        Ok(store) => store,
        Err(err) => return Session::unavailable(defaults, &format!("{err:#}")),
    };
    let token = cli.auth_token.as_deref().or(config.auth_token.as_deref());
    let identity = IdentitySource::resolve(token, &config.data_dir);
    Session::connect(store, &identity, defaults).await
}

fn print_overview(session: &Session<FileStore>, today: NaiveDate) -> Result<()> {
    if let Some(phrase) = pick_prompt(&SOOTHING_PHRASES, &mut rand::rng()) {
        println!("{}", display::render_phrase(phrase));
    }
    println!("{}", display::render_entry_prompt(&session.entry_prompt()));
    println!("{}", display::render_insight(&session.insight()));
    let calendar = session.calendar(today.year(), today.month(), today)?;
    println!("{}", display::render_calendar(&calendar));
    println!(
        "{}",
        display::render_sync(session.sync(), session.last_error())
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = AppConfig::from_path_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from '{}'", cli.config.display()))?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir.clone_from(dir);
    }

    let journal = if cli.offline {
        None
    } else {
        match Journal::new(&config.data_dir) {
            Ok(journal) => Some(journal),
            Err(err) => {
                eprintln!("Warning: journal unavailable: {err:#}");
                None
            }
        }
    };

    let mut session = open_session(&cli, &config).await;
    let today = Local::now().date_naive();

    match cli.command.as_ref().unwrap_or(&Command::Status) {
        Command::Status => print_overview(&session, today)?,
        Command::Log { date } => {
            let date = date.unwrap_or(today);
            let now = Utc::now();
            let outcome = session.record(date, now).await;
            journal_append(journal.as_ref(), &JournalEvent::from_outcome(&outcome, now));
            println!("{}", display::render_outcome(&outcome));
            println!("{}", display::render_insight(&session.insight()));
            println!(
                "{}",
                display::render_sync(session.sync(), session.last_error())
            );
            if let RecordOutcome::Rejected { .. } = outcome {
                std::process::exit(2);
            }
        }
        Command::Calendar { month } => {
            let (year, month) = month.unwrap_or((today.year(), today.month()));
            let calendar = session.calendar(year, month, today)?;
            println!("{}", display::render_calendar(&calendar));
        }
        Command::Settings {
            cycle_length,
            period_duration,
            theme,
            toggle_theme,
        } => {
            let changing =
                cycle_length.is_some() || period_duration.is_some() || theme.is_some() || *toggle_theme;
            if changing {
                let now = Utc::now();
                let settings = session
                    .update_settings(
                        |s| {
                            if let Some(days) = *cycle_length {
                                s.set_cycle_length(days);
                            }
                            if let Some(days) = *period_duration {
                                s.set_period_duration(days);
                            }
                            if let Some(theme) = *theme {
                                s.set_theme(theme);
                            }
                            if *toggle_theme {
                                s.toggle_theme();
                            }
                        },
                        now,
                    )
                    .await;
                let detail = format!(
                    "cycle length {} days, period duration {} days, theme {}",
                    settings.cycle_length, settings.period_duration, settings.theme
                );
                journal_append(
                    journal.as_ref(),
                    &JournalEvent::new(JournalAction::Settings, &detail, now),
                );
            }
            println!("{}", display::render_settings(session.settings()));
            if changing {
                println!(
                    "{}",
                    display::render_sync(session.sync(), session.last_error())
                );
            }
        }
        Command::Reset { yes } => {
            if !*yes && !confirm("Erase your cycle history permanently?")? {
                println!("Nothing erased.");
                return Ok(());
            }
            let now = Utc::now();
            let erased = session.profile().logs.len();
            session.reset(now).await;
            journal_append(
                journal.as_ref(),
                &JournalEvent::new(
                    JournalAction::Reset,
                    &format!("{erased} entries erased"),
                    now,
                ),
            );
            println!("History erased.");
            println!(
                "{}",
                display::render_sync(session.sync(), session.last_error())
            );
        }
        Command::Doctor => {
            let report = diagnose(session.profile());
            print!("{}", display::render_diagnostic_report(&report));
            if report.error_count() > 0 {
                std::process::exit(1);
            }
        }
        Command::History => {
            let events = history_journal(journal.as_ref(), &config.data_dir)
                .read_all()
                .context("Failed to read journal")?;
            print!("{}", display::render_journal(&events));
        }
    }

    Ok(())
}
