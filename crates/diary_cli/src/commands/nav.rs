use std::path::Path;

use anyhow::Result;
use diary_core::{guard, landing as resolve_landing, Navigation, Route};
use owo_colors::OwoColorize;

use super::App;

/// Running `diary` without a subcommand opens the landing route.
pub fn landing(app: &App) -> Result<()> {
    let session = app.current_session();
    let navigation = resolve_landing(&app.context, session.as_ref());
    show(app, navigation)
}

pub fn open(app: &App, path: &str) -> Result<()> {
    let route = Route::parse(path)?;
    let session = app.current_session();
    show(app, guard(route, session.as_ref()))
}

pub fn about(app: &App) -> Result<()> {
    app.require_session(Route::About)?;
    println!("{}", "diary".bold());
    println!("A personal diary with one note per day, kept on this device.");
    println!("Version {}", diary_core::core_version());
    Ok(())
}

pub fn paths(app: &App, config_path: &Path) -> Result<()> {
    println!("config    {}", config_path.display());
    println!("data      {}", app.config.data_dir()?.display());
    println!("database  {}", app.config.db_path()?.display());
    println!("logs      {}", app.config.log_dir()?.display());
    Ok(())
}

fn show(app: &App, navigation: Navigation) -> Result<()> {
    if let Navigation::Redirect(route) = navigation {
        println!("{} {}", "→".dimmed(), route.path().dimmed());
    }

    match navigation.target() {
        Route::Home => super::calendar::run(app, None, None),
        Route::About => about(app),
        Route::Login => {
            println!("Log in with:\n  diary login <email>");
            Ok(())
        }
        Route::Register => {
            println!("Welcome! Create an account with:\n  diary register <email>");
            Ok(())
        }
    }
}
