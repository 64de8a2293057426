use thiserror::Error;
use watchlist_db::OperationError;
use watchlist_lib::{RefreshError, SettingsError};
use watchlist_scraper::ScrapeError;
use watchlist_tmdb::TmdbError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Settings(#[from] SettingsError),

    #[error("Database error: {0}")]
    Database(#[from] OperationError),

    #[error("{0}")]
    Refresh(#[from] RefreshError),

    #[error("Could not create watchlist client: {0}")]
    Scraper(#[from] ScrapeError),

    #[error("Could not create TMDB client: {0}")]
    Tmdb(#[from] TmdbError),

    /// Runtime creation or async error
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl CliError {
    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }
}
