//! Month-grid calendar model.
//!
//! # Responsibility
//! - Build the whole-week day grid shown for one month.
//! - Navigate between months.
//!
//! # Invariants
//! - Weeks start on Monday; the grid always holds whole weeks (28–42 cells).
//! - Saturday and Sunday are weekend cells.

mod locale;

pub use locale::Locale;

use crate::model::note_date::{NoteDate, NoteDateError};
use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use std::collections::BTreeSet;

/// One day of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    /// False for leading/trailing days borrowed from adjacent months.
    pub in_month: bool,
    pub is_weekend: bool,
    pub has_note: bool,
    pub is_selected: bool,
    pub is_today: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    /// First day of the displayed month.
    pub month: NaiveDate,
    pub cells: Vec<DayCell>,
}

impl MonthGrid {
    /// Rows of seven cells, Monday first.
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(7)
    }
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn previous_month(month: NaiveDate) -> NaiveDate {
    let first = first_of_month(month);
    first.checked_sub_months(Months::new(1)).unwrap_or(first)
}

pub fn next_month(month: NaiveDate) -> NaiveDate {
    let first = first_of_month(month);
    first.checked_add_months(Months::new(1)).unwrap_or(first)
}

/// Parses `yyyy-MM` into the first day of that month.
pub fn parse_month(value: &str) -> Result<NaiveDate, NoteDateError> {
    let trimmed = value.trim();
    NoteDate::parse(&format!("{trimmed}-01"))
        .map(NoteDate::date)
        .map_err(|_| NoteDateError(trimmed.to_string()))
}

/// Builds the grid for the month containing `month`.
pub fn month_grid(
    month: NaiveDate,
    note_dates: &BTreeSet<NoteDate>,
    selected: Option<NoteDate>,
    today: NaiveDate,
) -> MonthGrid {
    let first = first_of_month(month);
    let last = next_month(first).pred_opt().unwrap_or(first);
    let lead = u64::from(first.weekday().num_days_from_monday());
    let trail = u64::from(6 - last.weekday().num_days_from_monday());
    let start = first.checked_sub_days(Days::new(lead)).unwrap_or(first);
    let end = last.checked_add_days(Days::new(trail)).unwrap_or(last);

    let cells = start
        .iter_days()
        .take_while(|date| *date <= end)
        .map(|date| DayCell {
            date,
            in_month: date.month() == first.month() && date.year() == first.year(),
            is_weekend: matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
            has_note: note_dates.contains(&NoteDate::new(date)),
            is_selected: selected.is_some_and(|s| s.date() == date),
            is_today: date == today,
        })
        .collect();

    MonthGrid {
        month: first,
        cells,
    }
}
