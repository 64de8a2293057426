//! Process configuration.
//!
//! Every setting resolves with the same priority chain:
//!
//! 1. Environment variable
//! 2. `[watchlist]` table in `~/.config/watchlist-sync/config.toml`
//! 3. Built-in default (username and API key have none and are required)

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use watchlist_core::Region;

use crate::error::SettingsError;
use crate::schedule::CronSchedule;

pub const USERNAME_VAR: &str = "LETTERBOXD_USERNAME";
pub const API_KEY_VAR: &str = "TMDB_API_KEY";
pub const REGION_VAR: &str = "WATCHLIST_REGION";
pub const SCHEDULE_VAR: &str = "WATCHLIST_SCHEDULE";
pub const DB_PATH_VAR: &str = "WATCHLIST_DB_PATH";
pub const PAGE_DELAY_VAR: &str = "WATCHLIST_PAGE_DELAY_MS";

/// Weekly, Sunday 00:00 UTC.
pub const DEFAULT_SCHEDULE: &str = "0 0 * * 0";
pub const DEFAULT_PAGE_DELAY_MS: u64 = 1500;

/// Fully resolved settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub username: String,
    pub tmdb_api_key: String,
    pub region: Region,
    pub refresh_schedule: CronSchedule,
    pub database_path: PathBuf,
    pub page_delay: Duration,
}

/// The `[watchlist]` table of the config file. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WatchlistConfig {
    pub username: Option<String>,
    pub tmdb_api_key: Option<String>,
    pub region: Option<String>,
    pub schedule: Option<String>,
    pub database_path: Option<PathBuf>,
    pub page_delay_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    watchlist: Option<WatchlistConfig>,
}

/// Where a setting's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingSource {
    EnvVar(&'static str),
    ConfigFile,
    Default,
    /// Required and not set anywhere.
    Missing,
}

impl std::fmt::Display for SettingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// Provenance of each setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingSources {
    pub username: SettingSource,
    pub tmdb_api_key: SettingSource,
    pub region: SettingSource,
    pub refresh_schedule: SettingSource,
    pub database_path: SettingSource,
    pub page_delay: SettingSource,
}

impl Settings {
    /// Load settings from the process environment and the config file.
    pub fn load() -> Result<Self, SettingsError> {
        let config = load_config_file()?;
        Self::resolve(|var| std::env::var(var).ok(), &config)
    }

    /// Resolve settings from an environment lookup and a parsed config table.
    ///
    /// Blank environment values count as unset.
    pub fn resolve(
        env: impl Fn(&str) -> Option<String>,
        config: &WatchlistConfig,
    ) -> Result<Self, SettingsError> {
        let lookup = |var: &str| env(var).filter(|v| !v.trim().is_empty());

        let username = lookup(USERNAME_VAR)
            .or_else(|| config.username.clone())
            .ok_or(SettingsError::Missing {
                setting: "username",
                env_var: USERNAME_VAR,
            })?;

        let tmdb_api_key = lookup(API_KEY_VAR)
            .or_else(|| config.tmdb_api_key.clone())
            .ok_or(SettingsError::Missing {
                setting: "TMDB API key",
                env_var: API_KEY_VAR,
            })?;

        let region: Region = match lookup(REGION_VAR).or_else(|| config.region.clone()) {
            Some(code) => code.parse()?,
            None => Region::default(),
        };

        let refresh_schedule: CronSchedule = lookup(SCHEDULE_VAR)
            .or_else(|| config.schedule.clone())
            .as_deref()
            .unwrap_or(DEFAULT_SCHEDULE)
            .parse()?;

        let database_path = resolve_database_path(&lookup, config);

        let page_delay_ms: u64 = match lookup(PAGE_DELAY_VAR) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| SettingsError::InvalidNumber {
                    setting: "page delay",
                    value: raw,
                })?,
            None => config.page_delay_ms.unwrap_or(DEFAULT_PAGE_DELAY_MS),
        };

        Ok(Self {
            username: username.trim().to_string(),
            tmdb_api_key: tmdb_api_key.trim().to_string(),
            region,
            refresh_schedule,
            database_path,
            page_delay: Duration::from_millis(page_delay_ms),
        })
    }
}

/// Resolve only the database location. Read-only commands use this so they
/// work without a username or API key configured.
pub fn load_database_path() -> Result<PathBuf, SettingsError> {
    let config = load_config_file()?;
    let lookup = |var: &str| std::env::var(var).ok().filter(|v| !v.trim().is_empty());
    Ok(resolve_database_path(&lookup, &config))
}

fn resolve_database_path(
    lookup: &impl Fn(&str) -> Option<String>,
    config: &WatchlistConfig,
) -> PathBuf {
    lookup(DB_PATH_VAR)
        .map(PathBuf::from)
        .or_else(|| config.database_path.clone())
        .unwrap_or_else(default_database_path)
}

/// Determine where each setting is coming from, without validating values.
pub fn setting_sources() -> Result<SettingSources, SettingsError> {
    let config = load_config_file()?;
    Ok(resolve_sources(|var| std::env::var(var).ok(), &config))
}

pub fn resolve_sources(
    env: impl Fn(&str) -> Option<String>,
    config: &WatchlistConfig,
) -> SettingSources {
    let source = |var: &'static str, in_config: bool, fallback: SettingSource| {
        if env(var).is_some_and(|v| !v.trim().is_empty()) {
            SettingSource::EnvVar(var)
        } else if in_config {
            SettingSource::ConfigFile
        } else {
            fallback
        }
    };

    SettingSources {
        username: source(USERNAME_VAR, config.username.is_some(), SettingSource::Missing),
        tmdb_api_key: source(
            API_KEY_VAR,
            config.tmdb_api_key.is_some(),
            SettingSource::Missing,
        ),
        region: source(REGION_VAR, config.region.is_some(), SettingSource::Default),
        refresh_schedule: source(
            SCHEDULE_VAR,
            config.schedule.is_some(),
            SettingSource::Default,
        ),
        database_path: source(
            DB_PATH_VAR,
            config.database_path.is_some(),
            SettingSource::Default,
        ),
        page_delay: source(
            PAGE_DELAY_VAR,
            config.page_delay_ms.is_some(),
            SettingSource::Default,
        ),
    }
}

/// Canonical config file path: `~/.config/watchlist-sync/config.toml`.
pub fn config_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("watchlist-sync").join("config.toml")
}

/// Default database location: `<data dir>/watchlist-sync/watchlist.db`.
pub fn default_database_path() -> PathBuf {
    let data = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    data.join("watchlist-sync").join("watchlist.db")
}

fn load_config_file() -> Result<WatchlistConfig, SettingsError> {
    read_config(&config_path())
}

/// Read the `[watchlist]` table from `path`. A missing file is an empty table.
pub fn read_config(path: &Path) -> Result<WatchlistConfig, SettingsError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(WatchlistConfig::default());
        }
        Err(source) => {
            return Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let file: ConfigFile = toml::from_str(&content).map_err(|source| SettingsError::ConfigFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(file.watchlist.unwrap_or_default())
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
