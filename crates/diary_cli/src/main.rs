mod commands;
mod config;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::App;
use crate::config::DiaryConfig;

#[derive(Parser)]
#[command(name = "diary")]
#[command(about = "A small personal diary with a calendar, stored on this device")]
#[command(version)]
struct Cli {
    /// Use this config file instead of ~/.config/diary/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and log in
    Register {
        email: String,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Log in with an existing account
    Login {
        email: String,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Log out of the current account
    Logout,
    /// Show the logged-in account
    Whoami,
    /// Show a month with note markers
    Calendar {
        /// Month to show (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,

        /// Highlight this day and print its note (YYYY-MM-DD)
        #[arg(short, long)]
        select: Option<String>,
    },
    /// Add, edit, delete or list notes
    Note {
        #[command(subcommand)]
        action: NoteCommand,
    },
    /// About this diary
    About,
    /// Navigate to a route (/, /login, /register, /about)
    Open { path: String },
    /// Print config, database and log locations
    Paths,
}

#[derive(Subcommand)]
enum NoteCommand {
    /// Write a note for a day that has none
    Add {
        /// Day of the note (YYYY-MM-DD)
        date: String,

        /// Note text (prompted when omitted)
        text: Option<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Replace the text of an existing note
    Edit {
        date: String,
        text: Option<String>,
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete a note
    Delete {
        date: String,
        #[arg(short, long)]
        yes: bool,
    },
    /// Print one note
    Show { date: String },
    /// Print all notes, newest first
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => DiaryConfig::config_path()?,
    };
    let config = DiaryConfig::load_or_init(&config_path)?;

    let app = App::open(config)?;

    match cli.command {
        None => commands::nav::landing(&app),
        Some(Commands::Register { email, password }) => {
            commands::auth::register(&app, &email, password)
        }
        Some(Commands::Login { email, password }) => commands::auth::login(&app, &email, password),
        Some(Commands::Logout) => commands::auth::logout(&app),
        Some(Commands::Whoami) => commands::auth::whoami(&app),
        Some(Commands::Calendar { month, select }) => {
            commands::calendar::run(&app, month.as_deref(), select.as_deref())
        }
        Some(Commands::Note { action }) => match action {
            NoteCommand::Add { date, text, yes } => commands::note::add(&app, &date, text, yes),
            NoteCommand::Edit { date, text, yes } => commands::note::edit(&app, &date, text, yes),
            NoteCommand::Delete { date, yes } => commands::note::delete(&app, &date, yes),
            NoteCommand::Show { date } => commands::note::show(&app, &date),
            NoteCommand::List => commands::note::list(&app),
        },
        Some(Commands::About) => commands::nav::about(&app),
        Some(Commands::Open { path }) => commands::nav::open(&app, &path),
        Some(Commands::Paths) => commands::nav::paths(&app, &config_path),
    }
}
