use anyhow::Result;
use dialoguer::{Confirm, Input};
use diary_core::{EditorOutcome, NoteDate, NoteEditor, NoteStore, Route};
use owo_colors::OwoColorize;

use super::App;
use crate::render::render_entry;

pub fn add(app: &App, date: &str, text: Option<String>, yes: bool) -> Result<()> {
    let session = app.require_session(Route::Home)?;
    let date = NoteDate::parse(date)?;
    let mut notes = NoteStore::open(&app.context);

    if notes.get(&session.email, date).is_some() {
        anyhow::bail!(
            "A note for {date} already exists.\n\n\
            Change it with:\n  \
            diary note edit {date}"
        );
    }

    let mut editor = NoteEditor::new();
    editor.select_date(date)?;
    editor.set_text(resolve_text(app, date, text, None)?)?;
    editor.request_save()?;

    if !confirm(yes, &format!("Save note for {date}?"))? {
        editor.cancel();
        println!("Not saved.");
        return Ok(());
    }
    report(editor.confirm(&mut notes, &session.email)?);
    Ok(())
}

pub fn edit(app: &App, date: &str, text: Option<String>, yes: bool) -> Result<()> {
    let session = app.require_session(Route::Home)?;
    let date = NoteDate::parse(date)?;
    let mut notes = NoteStore::open(&app.context);

    let Some(current) = notes.get(&session.email, date).map(str::to_string) else {
        anyhow::bail!(
            "No note for {date}.\n\n\
            Write one with:\n  \
            diary note add {date}"
        );
    };

    let mut editor = NoteEditor::new();
    editor.begin_edit(date, &current)?;
    editor.set_text(resolve_text(app, date, text, Some(&current))?)?;
    editor.request_save()?;

    if !confirm(yes, &format!("Save changes to {date}?"))? {
        editor.cancel();
        println!("Not saved.");
        return Ok(());
    }
    report(editor.confirm(&mut notes, &session.email)?);
    Ok(())
}

pub fn delete(app: &App, date: &str, yes: bool) -> Result<()> {
    let session = app.require_session(Route::Home)?;
    let date = NoteDate::parse(date)?;
    let mut notes = NoteStore::open(&app.context);

    if notes.get(&session.email, date).is_none() {
        println!("No note for {date}.");
        return Ok(());
    }

    let mut editor = NoteEditor::new();
    editor.request_delete(date)?;
    if !confirm(yes, &format!("Delete note for {date}?"))? {
        editor.cancel();
        println!("Kept.");
        return Ok(());
    }
    report(editor.confirm(&mut notes, &session.email)?);
    Ok(())
}

pub fn show(app: &App, date: &str) -> Result<()> {
    let session = app.require_session(Route::Home)?;
    let date = NoteDate::parse(date)?;
    let notes = NoteStore::open(&app.context);

    match notes.get(&session.email, date) {
        Some(text) => println!("{}", render_entry(date, text, app.config.locale)),
        None => println!("No note for {date}."),
    }
    Ok(())
}

pub fn list(app: &App) -> Result<()> {
    let session = app.require_session(Route::Home)?;
    let notes = NoteStore::open(&app.context);
    let entries = notes.entries_newest_first(&session.email);

    if entries.is_empty() {
        println!("No notes yet.");
        return Ok(());
    }

    let rendered = entries
        .iter()
        .map(|(date, text)| render_entry(*date, text, app.config.locale))
        .collect::<Vec<_>>();
    println!("{}", rendered.join("\n\n"));
    Ok(())
}

fn resolve_text(
    app: &App,
    date: NoteDate,
    text: Option<String>,
    current: Option<&str>,
) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    let prompt = app.config.locale.long_date(date.date());
    let input = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true);
    let input = match current {
        Some(current) => input.with_initial_text(current),
        None => input,
    };
    Ok(input.interact_text()?)
}

fn confirm(yes: bool, prompt: &str) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    Ok(Confirm::new().with_prompt(prompt).default(true).interact()?)
}

fn report(outcome: EditorOutcome) {
    match outcome {
        EditorOutcome::Saved(date) => println!("{} Saved note for {date}", "✓".green()),
        EditorOutcome::Deleted(date) => println!("{} Deleted note for {date}", "✓".green()),
    }
}
