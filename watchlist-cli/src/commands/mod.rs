pub(crate) mod config;
pub(crate) mod list;
pub(crate) mod refresh;
pub(crate) mod run;
pub(crate) mod status;

use std::sync::Arc;

use watchlist_db::SqliteStore;
use watchlist_lib::{Refresher, Settings};
use watchlist_scraper::LetterboxdClient;
use watchlist_tmdb::{Enricher, TmdbClient};

use crate::CliError;

/// Wire the live clients and the on-disk store into a refresher.
pub(crate) fn build_refresher(settings: &Settings) -> Result<Arc<Refresher>, CliError> {
    let source = Arc::new(LetterboxdClient::new()?);
    let catalog = Arc::new(TmdbClient::new(settings.tmdb_api_key.clone())?);
    let store = Arc::new(SqliteStore::open(&settings.database_path)?);
    log::debug!("Using database {}", settings.database_path.display());

    let refresher = Refresher::new(source, Enricher::new(catalog), store)
        .with_page_delay(settings.page_delay);
    Ok(Arc::new(refresher))
}

pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {}", e)))
}

pub(crate) fn open_store() -> Result<SqliteStore, CliError> {
    let path = watchlist_lib::settings::load_database_path()?;
    Ok(SqliteStore::open(&path)?)
}
