//! Day occupancy
//!
//! A day is occupied when any entry covers it. Open entries are projected
//! forward by the configured period duration.

use chrono::{Days, NaiveDate};

use crate::engine::model::{CycleEntry, Settings};

/// Last day an entry covers: its recorded end, or
/// `start + (period_duration - 1)` while it is still open.
#[must_use]
pub fn effective_end(entry: &CycleEntry, settings: &Settings) -> NaiveDate {
    entry.end.unwrap_or_else(|| {
        let span = u64::from(settings.period_duration.saturating_sub(1));
        entry
            .start
            .checked_add_days(Days::new(span))
            .unwrap_or(NaiveDate::MAX)
    })
}

/// Whether `date` falls inside any entry's actual or presumed range
#[must_use]
pub fn is_day_occupied(logs: &[CycleEntry], settings: &Settings, date: NaiveDate) -> bool {
    logs.iter()
        .any(|entry| entry.start <= date && date <= effective_end(entry, settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{closed, date, open};

    #[test]
    fn test_open_entry_projects_period_duration() {
        let logs = vec![open(1, "2024-03-01")];
        let settings = Settings::default();

        for d in ["2024-03-01", "2024-03-02", "2024-03-03", "2024-03-04"] {
            assert!(is_day_occupied(&logs, &settings, date(d)), "{d} should be occupied");
        }
        assert!(!is_day_occupied(&logs, &settings, date("2024-03-05")));
        assert!(!is_day_occupied(&logs, &settings, date("2024-02-29")));
    }

    #[test]
    fn test_closed_entry_uses_recorded_end() {
        let logs = vec![closed(1, "2024-03-01", "2024-03-07")];
        let settings = Settings::default();

        assert!(is_day_occupied(&logs, &settings, date("2024-03-07")));
        assert!(!is_day_occupied(&logs, &settings, date("2024-03-08")));
    }

    #[test]
    fn test_single_day_duration() {
        let logs = vec![open(1, "2024-03-01")];
        let settings = Settings {
            period_duration: 1,
            ..Settings::default()
        };
        assert!(is_day_occupied(&logs, &settings, date("2024-03-01")));
        assert!(!is_day_occupied(&logs, &settings, date("2024-03-02")));
    }

    #[test]
    fn test_projection_crosses_month_boundary() {
        let logs = vec![open(1, "2024-02-28")];
        let settings = Settings::default();
        assert_eq!(effective_end(&logs[0], &settings), date("2024-03-02"));
        assert!(is_day_occupied(&logs, &settings, date("2024-02-29")));
    }

    #[test]
    fn test_overlapping_entries_union() {
        let logs = vec![
            closed(1, "2024-03-01", "2024-03-05"),
            closed(2, "2024-03-04", "2024-03-09"),
        ];
        let settings = Settings::default();
        assert!(is_day_occupied(&logs, &settings, date("2024-03-04")));
        assert!(is_day_occupied(&logs, &settings, date("2024-03-09")));
        assert!(!is_day_occupied(&logs, &settings, date("2024-03-10")));
    }

    #[test]
    fn test_empty_log_occupies_nothing() {
        assert!(!is_day_occupied(&[], &Settings::default(), date("2024-03-01")));
    }
}
