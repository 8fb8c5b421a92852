//! Month calendar projection
//!
//! Lays out one month Sunday-first and marks occupied days and today.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};

use crate::engine::model::{CycleEntry, Settings};
use crate::engine::occupancy::is_day_occupied;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Weekday column headers, Sunday first
pub const WEEKDAY_HEADERS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

/// A single day cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    /// The calendar date
    pub date: NaiveDate,
    /// Day of month (1-based)
    pub day: u32,
    /// Whether this is the injected "today"
    pub is_today: bool,
    /// Whether any cycle entry covers this day
    pub is_occupied: bool,
}

/// One month of day cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthCalendar {
    /// Calendar year
    pub year: i32,
    /// Month number (1-12)
    pub month: u32,
    /// Empty cells before the 1st, counted from Sunday
    pub leading_blanks: u32,
    /// Every day of the month in order
    pub days: Vec<CalendarDay>,
}

impl MonthCalendar {
    /// Build the month containing `year`/`month`, flagging `today` and every
    /// occupied day.
    pub fn build(
        year: i32,
        month: u32,
        today: NaiveDate,
        logs: &[CycleEntry],
        settings: &Settings,
    ) -> Result<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .with_context(|| format!("Invalid calendar month: {year}-{month:02}"))?;

        let days = first
            .iter_days()
            .take_while(|d| d.month() == month)
            .map(|date| CalendarDay {
                date,
                day: date.day(),
                is_today: date == today,
                is_occupied: is_day_occupied(logs, settings, date),
            })
            .collect();

        Ok(Self {
            year,
            month,
            leading_blanks: first.weekday().num_days_from_sunday(),
            days,
        })
    }

    /// Build the month that contains `today`
    pub fn for_today(today: NaiveDate, logs: &[CycleEntry], settings: &Settings) -> Result<Self> {
        Self::build(today.year(), today.month(), today, logs, settings)
    }

    /// Heading such as "January 2024"
    #[must_use]
    pub fn title(&self) -> String {
        let name = usize::try_from(self.month)
            .ok()
            .and_then(|m| MONTH_NAMES.get(m.wrapping_sub(1)))
            .copied()
            .unwrap_or("?");
        format!("{name} {}", self.year)
    }

    /// Number of occupied days in the month
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.days.iter().filter(|d| d.is_occupied).count()
    }
}
