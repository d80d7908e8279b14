use anyhow::Result;
use chrono::Local;
use diary_core::calendar::{first_of_month, parse_month};
use diary_core::{month_grid, NoteDate, NoteStore, Route};
use owo_colors::OwoColorize;

use super::App;
use crate::render::{render_entry, render_month};

pub fn run(app: &App, month: Option<&str>, select: Option<&str>) -> Result<()> {
    let session = app.require_session(Route::Home)?;
    let today = Local::now().date_naive();

    let selected = select.map(NoteDate::parse).transpose()?;
    let month = match (month, selected) {
        (Some(value), _) => parse_month(value)?,
        (None, Some(date)) => first_of_month(date.date()),
        (None, None) => first_of_month(today),
    };

    let notes = NoteStore::open(&app.context);
    let grid = month_grid(month, &notes.note_dates(&session.email), selected, today);
    println!("{}", render_month(&grid, app.config.locale));

    if let Some(date) = selected {
        println!();
        match notes.get(&session.email, date) {
            Some(text) => println!("{}", render_entry(date, text, app.config.locale)),
            None => println!(
                "{}\n  {}",
                app.config.locale.long_date(date.date()).bold(),
                "No note yet. Add one with `diary note add`.".dimmed()
            ),
        }
    }
    Ok(())
}
