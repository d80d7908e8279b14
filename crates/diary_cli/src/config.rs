//! User configuration at ~/.config/diary/config.toml

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use diary_core::Locale;
use serde::Deserialize;

const DB_FILE_NAME: &str = "diary.sqlite3";
const LOG_DIR_NAME: &str = "logs";
const DEFAULT_AUTH_DELAY_MS: u64 = 1000;

const DEFAULT_CONFIG: &str = r#"# diary configuration

# Where the database and logs live. `~/` expands to your home directory.
# data_dir = "~/.local/share/diary"

# trace | debug | info | warn | error
# log_level = "info"

# Calendar language: "en" or "ru"
# locale = "en"

# Artificial delay applied to login and registration, in milliseconds
# auth_delay_ms = 1000
"#;

#[derive(Debug, Clone, Deserialize)]
pub struct DiaryConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    pub log_level: Option<String>,

    #[serde(default)]
    pub locale: Locale,

    #[serde(default = "default_auth_delay_ms")]
    pub auth_delay_ms: u64,
}

impl Default for DiaryConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: None,
            locale: Locale::default(),
            auth_delay_ms: DEFAULT_AUTH_DELAY_MS,
        }
    }
}

fn default_data_dir() -> String {
    dirs::data_dir()
        .map(|dir| dir.join("diary").to_string_lossy().into_owned())
        .unwrap_or_else(|| "~/.diary".to_string())
}

fn default_auth_delay_ms() -> u64 {
    DEFAULT_AUTH_DELAY_MS
}

impl DiaryConfig {
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("diary");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads the config, writing a commented default on first run.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create config directory at {}", parent.display())
                })?;
            }
            std::fs::write(path, DEFAULT_CONFIG)
                .with_context(|| format!("Failed to write config file at {}", path.display()))?;
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))
    }

    /// Data directory with `~/` expanded; relative paths resolve against the
    /// working directory.
    pub fn data_dir(&self) -> Result<PathBuf> {
        let expanded = expand_path(&self.data_dir);
        if expanded.is_absolute() {
            return Ok(expanded);
        }
        let cwd = std::env::current_dir().context("Could not determine working directory")?;
        Ok(cwd.join(expanded))
    }

    pub fn db_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(DB_FILE_NAME))
    }

    pub fn log_dir(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(LOG_DIR_NAME))
    }

    pub fn log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .unwrap_or_else(|| diary_core::default_log_level())
    }
}

/// Expand ~ in paths to the home directory
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::{expand_path, DiaryConfig};
    use diary_core::Locale;

    #[test]
    fn first_run_writes_commented_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = DiaryConfig::load_or_init(&path).unwrap();
        assert_eq!(config.auth_delay_ms, 1000);
        assert_eq!(config.locale, Locale::En);

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("# locale = \"en\""));
        let reparsed = DiaryConfig::load_or_init(&path).unwrap();
        assert_eq!(reparsed.auth_delay_ms, 1000);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "data_dir = \"/tmp/diary-test\"\nlocale = \"ru\"\nauth_delay_ms = 0\nlog_level = \"warn\"\n",
        )
        .unwrap();

        let config = DiaryConfig::load_or_init(&path).unwrap();
        assert_eq!(config.locale, Locale::Ru);
        assert_eq!(config.auth_delay_ms, 0);
        assert_eq!(config.log_level(), "warn");
        assert!(config
            .db_path()
            .unwrap()
            .ends_with("diary-test/diary.sqlite3"));
    }

    #[test]
    fn unknown_locale_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "locale = \"fr\"\n").unwrap();

        assert!(DiaryConfig::load_or_init(&path).is_err());
    }

    #[test]
    fn expand_path_leaves_plain_paths_alone() {
        assert_eq!(expand_path("/var/diary"), std::path::PathBuf::from("/var/diary"));
    }
}
