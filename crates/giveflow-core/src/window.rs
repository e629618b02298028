//! Trailing time-window filters for dashboard listings.
//!
//! Calendar windows are anchored to the caller's local day boundaries:
//! the week starts Monday 00:00 local and the month starts on the 1st
//! 00:00 local. Callers fix "local" by passing `now` with an explicit
//! UTC offset; one consistent offset per dashboard keeps the boundary
//! day stable.

use chrono::{DateTime, Datelike, Duration, FixedOffset, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Window a listing can be restricted to, relative to `now`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimeWindow {
    /// Trailing 7 x 24 h window (instant-based, not day-aligned).
    LastSevenDays,
    /// Since Monday 00:00 in the caller's offset.
    ThisWeek,
    /// Since the 1st of the current month, 00:00 in the caller's offset.
    ThisMonth,
}

impl TimeWindow {
    /// Whether a record created at `created_at` falls inside the window
    /// ending at `now`.
    ///
    /// Calendar windows compare dates in the caller's offset, so the
    /// Monday/1st boundary lands exactly on local midnight without any
    /// DST-fold handling (a fixed offset has no folds).
    pub fn contains(&self, created_at: DateTime<Utc>, now: DateTime<FixedOffset>) -> bool {
        match self {
            TimeWindow::LastSevenDays => {
                created_at >= now.with_timezone(&Utc) - Duration::days(7)
            }
            TimeWindow::ThisWeek => {
                let created_local = created_at.with_timezone(now.offset()).date_naive();
                let monday = now.date_naive().week(Weekday::Mon).first_day();
                created_local >= monday
            }
            TimeWindow::ThisMonth => {
                let created_local = created_at.with_timezone(now.offset()).date_naive();
                let today = now.date_naive();
                created_local.year() == today.year() && created_local.month() == today.month()
            }
        }
    }
}
