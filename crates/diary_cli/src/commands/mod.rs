pub mod auth;
pub mod calendar;
pub mod nav;
pub mod note;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use diary_core::{
    guard, AuthService, Navigation, Route, Session, SessionMarker, SqliteSlotStore,
    StorageContext,
};
use log::info;
use owo_colors::OwoColorize;

use crate::config::DiaryConfig;

/// Opened storage plus the config it came from.
pub struct App {
    pub config: DiaryConfig,
    pub context: StorageContext,
}

impl App {
    pub fn open(config: DiaryConfig) -> Result<Self> {
        let data_dir = config.data_dir()?;
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory at {}", data_dir.display()))?;

        // The diary works without file logs.
        let log_dir = config.log_dir()?;
        if let Err(err) = diary_core::init_logging(config.log_level(), &log_dir.to_string_lossy()) {
            eprintln!("{} {err}", "warning:".yellow());
        }

        let db_path = config.db_path()?;
        let store = SqliteSlotStore::open(&db_path)
            .with_context(|| format!("Failed to open diary database at {}", db_path.display()))?;
        info!(
            "event=cli_open module=cli status=ok locale={:?} auth_delay_ms={}",
            config.locale, config.auth_delay_ms
        );

        Ok(Self {
            config,
            context: StorageContext::new(Arc::new(store)),
        })
    }

    pub fn auth(&self) -> AuthService {
        AuthService::open(
            &self.context,
            Duration::from_millis(self.config.auth_delay_ms),
        )
    }

    pub fn current_session(&self) -> Option<Session> {
        SessionMarker::open(&self.context).current().cloned()
    }

    /// Session for a guarded route; bails with a login hint on redirect.
    pub fn require_session(&self, route: Route) -> Result<Session> {
        let session = self.current_session();
        match (guard(route, session.as_ref()), session) {
            (Navigation::Render(_), Some(session)) => Ok(session),
            _ => anyhow::bail!(
                "Not logged in.\n\n\
                Log in with:\n  \
                diary login <email>\n\n\
                Or create an account with:\n  \
                diary register <email>"
            ),
        }
    }
}
