//! Trailing time-window filter.
//!
//! The reference date ("today") is always passed in by the caller; nothing
//! in here reads the clock.

use crate::types::Event;
use chrono::{Days, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// Which slice of history to keep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TimeWindow {
    #[default]
    All,
    Last180Days,
    Last90Days,
    Last30Days,
}

impl TimeWindow {
    /// Length of the window in days, `None` for [`TimeWindow::All`].
    pub fn days(self) -> Option<u64> {
        match self {
            TimeWindow::All => None,
            TimeWindow::Last180Days => Some(180),
            TimeWindow::Last90Days => Some(90),
            TimeWindow::Last30Days => Some(30),
        }
    }

    /// Earliest date retained, inclusive.
    pub fn cutoff(self, today: NaiveDate) -> Option<NaiveDate> {
        let days = self.days()?;
        Some(today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN))
    }

    pub fn contains(self, date: NaiveDate, today: NaiveDate) -> bool {
        self.cutoff(today).map_or(true, |cutoff| date >= cutoff)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeWindow::All => "all",
            TimeWindow::Last180Days => "180d",
            TimeWindow::Last90Days => "90d",
            TimeWindow::Last30Days => "30d",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(TimeWindow::All),
            "180d" | "last_180_days" => Ok(TimeWindow::Last180Days),
            "90d" | "last_90_days" => Ok(TimeWindow::Last90Days),
            "30d" | "last_30_days" => Ok(TimeWindow::Last30Days),
            _ => Err(crate::Error::invalid(
                "time window",
                s,
                "one of all, 180d, 90d, 30d",
            )),
        }
    }
}

/// Keep the events whose date is on or after the window's cutoff.
///
/// [`TimeWindow::All`] returns the input unchanged. Order is preserved.
pub fn filter_window(events: Vec<Event>, window: TimeWindow, today: NaiveDate) -> Vec<Event> {
    let Some(cutoff) = window.cutoff(today) else {
        return events;
    };
    let before = events.len();
    let kept: Vec<Event> = events.into_iter().filter(|e| e.date() >= cutoff).collect();
    tracing::debug!(%window, %cutoff, before, after = kept.len(), "applied time window");
    kept
}
