use chrono::{Datelike, Duration, NaiveDate};

/// `"%Y-%m"` key identifying a calendar month.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Start of the rolling business-accounting window relative to `today`.
///
/// The window opens on `cycle_day` of the current month once that day has
/// been reached, otherwise on `cycle_day` of the previous month. The day is
/// clamped to the target month's length. Nothing is stored: callers
/// recompute the boundary from the clock on every read.
pub fn cycle_start(cycle_day: u32, today: NaiveDate) -> NaiveDate {
    let anchor = if today.day() < cycle_day {
        shift_month(today, -1)
    } else {
        today
    };
    with_day_clamped(anchor, cycle_day)
}

/// Moves a date by whole months, clamping the day to the target month.
pub fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    let day = date.day().min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap_or(date)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    let last_current = first_next - Duration::days(1);
    last_current.day()
}

fn with_day_clamped(date: NaiveDate, day: u32) -> NaiveDate {
    let clamped = day.clamp(1, days_in_month(date.year(), date.month()));
    NaiveDate::from_ymd_opt(date.year(), date.month(), clamped).unwrap_or(date)
}

/// Time windows the fleet screen filters entries by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryWindow {
    All,
    /// Entries dated today.
    Daily,
    /// Entries from the last seven days.
    Weekly,
    /// Entries inside the current accounting cycle.
    Cycle,
}

impl EntryWindow {
    /// Earliest date (inclusive) an entry may carry to pass the filter, or
    /// `None` for no cutoff.
    pub fn cutoff(self, cycle_day: u32, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            EntryWindow::All => None,
            EntryWindow::Daily => Some(today),
            EntryWindow::Weekly => Some(today - Duration::days(7)),
            EntryWindow::Cycle => Some(cycle_start(cycle_day, today)),
        }
    }
}
