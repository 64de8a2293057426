use std::path::PathBuf;

use thiserror::Error;
use watchlist_core::RegionParseError;
use watchlist_db::OperationError;
use watchlist_scraper::ScrapeError;

use crate::schedule::CronError;

/// Why a refresh run failed.
///
/// A run rejected because another is in flight is not an error.
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("Watchlist scrape failed: {0}")]
    Scrape(#[from] ScrapeError),

    #[error("Store error: {0}")]
    Store(#[from] OperationError),
}

/// Errors while assembling [`Settings`](crate::settings::Settings).
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Missing {setting}. Set {env_var} or add it to the [watchlist] table of the config file")]
    Missing {
        setting: &'static str,
        env_var: &'static str,
    },

    #[error("Invalid region: {0}")]
    InvalidRegion(#[from] RegionParseError),

    #[error("Invalid refresh schedule: {0}")]
    InvalidSchedule(#[from] CronError),

    #[error("Invalid {setting} '{value}': expected a whole number")]
    InvalidNumber { setting: &'static str, value: String },

    #[error("Could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed config file {}: {source}", path.display())]
    ConfigFile {
        path: PathBuf,
        source: toml::de::Error,
    },
}
