//! The exclusive refresh pass.
//!
//! A [`Refresher`] owns the "is refreshing" flag. Only the caller that flips
//! it from idle to refreshing runs; everyone else is turned away immediately.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinHandle;
use watchlist_core::{Region, ResolutionStatus};
use watchlist_db::FilmStore;
use watchlist_scraper::{fetch_watchlist, PageSource, DEFAULT_PAGE_DELAY};
use watchlist_tmdb::Enricher;

use crate::error::RefreshError;

/// Counts from one completed refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    /// References scraped, including cross-page duplicates.
    pub scraped: usize,
    pub found: usize,
    pub not_found: usize,
    pub errored: usize,
    /// Stored films deleted because they left the watchlist.
    pub removed: usize,
}

impl RefreshSummary {
    fn record(&mut self, status: ResolutionStatus) {
        match status {
            ResolutionStatus::Found => self.found += 1,
            ResolutionStatus::NotFound => self.not_found += 1,
            ResolutionStatus::Error | ResolutionStatus::Pending => self.errored += 1,
        }
    }
}

impl fmt::Display for RefreshSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} scraped, {} found, {} not found, {} errors, {} removed",
            self.scraped, self.found, self.not_found, self.errored, self.removed
        )
    }
}

/// Outcome of [`Refresher::trigger`].
#[derive(Debug)]
pub enum Trigger {
    /// A background run was spawned.
    Started(JoinHandle<Result<bool, RefreshError>>),
    AlreadyRunning,
}

impl Trigger {
    pub fn status(&self) -> TriggerStatus {
        match self {
            Self::Started(_) => TriggerStatus::Started,
            Self::AlreadyRunning => TriggerStatus::AlreadyRunning,
        }
    }
}

/// Wire form of a trigger outcome: `"started"` or `"already_running"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerStatus {
    Started,
    AlreadyRunning,
}

impl TriggerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::AlreadyRunning => "already_running",
        }
    }
}

impl fmt::Display for TriggerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resets the refreshing flag when dropped, whichever way the run ends.
struct RefreshGuard<'a>(&'a AtomicBool);

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Scrape, enrich, persist and reconcile, one run at a time.
pub struct Refresher {
    source: Arc<dyn PageSource>,
    enricher: Enricher,
    store: Arc<dyn FilmStore>,
    page_delay: Duration,
    refreshing: AtomicBool,
}

impl Refresher {
    pub fn new(source: Arc<dyn PageSource>, enricher: Enricher, store: Arc<dyn FilmStore>) -> Self {
        Self {
            source,
            enricher,
            store,
            page_delay: DEFAULT_PAGE_DELAY,
            refreshing: AtomicBool::new(false),
        }
    }

    /// Delay between watchlist page fetches. `Duration::ZERO` disables it.
    pub fn with_page_delay(mut self, page_delay: Duration) -> Self {
        self.page_delay = page_delay;
        self
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing.load(Ordering::Acquire)
    }

    pub fn store(&self) -> &Arc<dyn FilmStore> {
        &self.store
    }

    fn try_begin(&self) -> Option<RefreshGuard<'_>> {
        self.refreshing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| RefreshGuard(&self.refreshing))
    }

    /// Run one refresh. `Ok(false)` means another run was already in flight
    /// and nothing was done.
    pub async fn run_refresh(&self, username: &str, region: &Region) -> Result<bool, RefreshError> {
        Ok(self
            .run_refresh_with_summary(username, region)
            .await?
            .is_some())
    }

    /// Like [`run_refresh`](Self::run_refresh), returning the run's counts.
    pub async fn run_refresh_with_summary(
        &self,
        username: &str,
        region: &Region,
    ) -> Result<Option<RefreshSummary>, RefreshError> {
        let Some(_guard) = self.try_begin() else {
            log::info!("Refresh already in progress, skipping");
            return Ok(None);
        };

        log::info!("Refreshing watchlist of '{}' for region {}", username, region);
        let references = fetch_watchlist(self.source.as_ref(), username, self.page_delay).await?;
        let films = self.enricher.enrich(region, &references).await;

        let mut summary = RefreshSummary {
            scraped: references.len(),
            ..Default::default()
        };
        for film in films.values() {
            self.store.upsert(film)?;
            summary.record(film.status);
        }

        let keep: HashSet<String> = references.iter().map(|r| r.slug.clone()).collect();
        summary.removed = self.store.delete_not_in(&keep)?;

        log::info!("Refresh complete: {}", summary);
        Ok(Some(summary))
    }

    /// Start a refresh in the background unless one is already running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn trigger(self: &Arc<Self>, username: impl Into<String>, region: Region) -> Trigger {
        if self.is_refreshing() {
            return Trigger::AlreadyRunning;
        }

        let refresher = Arc::clone(self);
        let username = username.into();
        let handle = tokio::spawn(async move {
            let result = refresher.run_refresh(&username, &region).await;
            if let Err(e) = &result {
                log::error!("Triggered refresh failed: {}", e);
            }
            result
        });
        Trigger::Started(handle)
    }
}

#[cfg(test)]
#[path = "tests/refresh_tests.rs"]
mod tests;
