use anyhow::{Context, Result};
use diary_core::Route;
use owo_colors::OwoColorize;

use super::App;

pub fn register(app: &App, email: &str, password: Option<String>) -> Result<()> {
    let password = resolve_password(password)?;
    let mut auth = app.auth();

    println!("Creating account...");
    let session = auth.register(email.trim(), &password)?;

    println!("{} Registered and logged in as {}", "✓".green(), session.email);
    println!("\nWrite your first note with `diary note add <YYYY-MM-DD>`.");
    Ok(())
}

pub fn login(app: &App, email: &str, password: Option<String>) -> Result<()> {
    let password = resolve_password(password)?;
    let mut auth = app.auth();

    println!("Logging in...");
    let session = auth.login(email.trim(), &password)?;

    println!("{} Logged in as {}", "✓".green(), session.email);
    Ok(())
}

pub fn logout(app: &App) -> Result<()> {
    let mut auth = app.auth();
    match auth.current().cloned() {
        Some(session) => {
            auth.logout();
            println!("Logged out {}", session.email);
        }
        None => println!("Not logged in."),
    }
    Ok(())
}

pub fn whoami(app: &App) -> Result<()> {
    let session = app.require_session(Route::Home)?;
    println!("{}", session.email);
    Ok(())
}

/// Prompt the user for password input (hidden).
fn resolve_password(password: Option<String>) -> Result<String> {
    match password {
        Some(password) => Ok(password),
        None => rpassword::prompt_password("Password: ").context("Failed to read password"),
    }
}
