//! Colored terminal rendering for diary types.

use chrono::Datelike;
use diary_core::{DayCell, Locale, MonthGrid, NoteDate};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for DayCell {
    /// Four columns: `[05]` when selected, ` 05•` when a note exists.
    fn render(&self) -> String {
        let day = format!("{:>2}", self.date.day());
        let (open, close) = match (self.is_selected, self.has_note) {
            (true, _) => ("[", "]"),
            (false, true) => (" ", "•"),
            (false, false) => (" ", " "),
        };

        let mut day = if self.is_weekend {
            day.red().to_string()
        } else {
            day
        };
        if self.is_today {
            day = day.bold().underline().to_string();
        }

        let close = if self.has_note {
            close.green().to_string()
        } else {
            close.to_string()
        };
        let cell = format!("{open}{day}{close}");

        if self.in_month {
            cell
        } else {
            cell.dimmed().to_string()
        }
    }
}

/// Month title, weekday header and one line per week.
pub fn render_month(grid: &MonthGrid, locale: Locale) -> String {
    let mut lines = Vec::new();
    lines.push(locale.month_title(grid.month).bold().to_string());

    let header = locale
        .weekday_headers()
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let name = format!(" {name:>2} ");
            if index >= 5 {
                name.red().to_string()
            } else {
                name
            }
        })
        .collect::<String>();
    lines.push(header);

    for week in grid.weeks() {
        lines.push(week.iter().map(Render::render).collect::<String>());
    }
    lines.join("\n")
}

/// One diary entry: long date heading and the note text.
pub fn render_entry(date: NoteDate, text: &str, locale: Locale) -> String {
    format!("{}\n  {}", locale.long_date(date.date()).bold(), text)
}
