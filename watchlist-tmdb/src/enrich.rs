//! Catalog enrichment: turn scraped references into films.
//!
//! Every reference yields exactly one [`Film`]. Lookup failures are recorded
//! on the film's status rather than returned, so one bad title never costs the
//! rest of the batch.

use std::collections::{HashMap, HashSet};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::FutureExt;
use futures::future::join_all;
use tokio::sync::Semaphore;
use watchlist_core::{Film, Reference, Region, ResolutionStatus, StreamingOffer};

use crate::client::CatalogApi;
use crate::error::TmdbError;
use crate::types::{MovieDetails, WatchProvidersResponse};

/// Upper bound on TMDB requests in flight across a whole batch.
pub const MAX_CONCURRENT_REQUESTS: usize = 10;

const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";
const POSTER_SIZE: &str = "w300";
const LOGO_SIZE: &str = "w45";

/// Resolves references against the catalog with bounded concurrency.
///
/// The request limiter belongs to the enricher, so every batch it runs shares
/// the same [`MAX_CONCURRENT_REQUESTS`] budget.
pub struct Enricher {
    api: Arc<dyn CatalogApi>,
    limiter: Semaphore,
}

impl Enricher {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self {
            api,
            limiter: Semaphore::new(MAX_CONCURRENT_REQUESTS),
        }
    }

    /// Enrich every reference concurrently. Returns films keyed by slug.
    ///
    /// Never fails: a reference whose lookup errors (or panics) comes back
    /// with status `error`.
    pub async fn enrich(&self, region: &Region, references: &[Reference]) -> HashMap<String, Film> {
        let lookups = references
            .iter()
            .map(|reference| self.enrich_isolated(region, reference));

        let films = join_all(lookups).await;
        log::info!(
            "Enriched {} films ({} found)",
            films.len(),
            films.iter().filter(|f| f.is_found()).count()
        );

        films.into_iter().map(|f| (f.slug.clone(), f)).collect()
    }

    /// [`enrich_one`](Self::enrich_one) with panics turned into an `error` film.
    async fn enrich_isolated(&self, region: &Region, reference: &Reference) -> Film {
        match AssertUnwindSafe(self.enrich_one(region, reference))
            .catch_unwind()
            .await
        {
            Ok(film) => film,
            Err(_) => {
                log::error!("Enrichment of '{}' panicked", reference.slug);
                Film::with_status(reference, ResolutionStatus::Error, None, region, Utc::now())
            }
        }
    }

    async fn enrich_one(&self, region: &Region, reference: &Reference) -> Film {
        let checked_at = Utc::now();

        let tmdb_id = match self.search(&reference.title).await {
            Ok(Some(id)) => id,
            Ok(None) => {
                log::debug!("No TMDB match for '{}'", reference.title);
                return Film::with_status(reference, ResolutionStatus::NotFound, None, region, checked_at);
            }
            Err(e) => {
                log::warn!("TMDB search failed for '{}': {}", reference.title, e);
                return Film::with_status(reference, ResolutionStatus::Error, None, region, checked_at);
            }
        };

        match self.details_and_providers(tmdb_id).await {
            Ok((details, providers)) => {
                found_film(reference, region, tmdb_id, &details, &providers, checked_at)
            }
            Err(e) => {
                log::warn!(
                    "TMDB lookup of {} failed for '{}': {}",
                    tmdb_id,
                    reference.title,
                    e
                );
                Film::with_status(reference, ResolutionStatus::Error, Some(tmdb_id), region, checked_at)
            }
        }
    }

    async fn search(&self, title: &str) -> Result<Option<i64>, TmdbError> {
        // The limiter is never closed, so acquire cannot fail.
        let _permit = self.limiter.acquire().await.ok();
        Ok(self.api.search_movie(title).await?.first_id())
    }

    /// Fetch details and providers concurrently, holding one permit per request.
    async fn details_and_providers(
        &self,
        tmdb_id: i64,
    ) -> Result<(MovieDetails, WatchProvidersResponse), TmdbError> {
        let _permits = self.limiter.acquire_many(2).await.ok();
        tokio::try_join!(
            self.api.movie_details(tmdb_id),
            self.api.watch_providers(tmdb_id)
        )
    }
}

/// Build a `found` film from a successful detail + providers lookup.
pub(crate) fn found_film(
    reference: &Reference,
    region: &Region,
    tmdb_id: i64,
    details: &MovieDetails,
    providers: &WatchProvidersResponse,
    checked_at: DateTime<Utc>,
) -> Film {
    let regional = providers.for_region(region.code());

    let mut seen = HashSet::new();
    let offers = regional
        .map(|r| r.flatrate.as_slice())
        .unwrap_or_default()
        .iter()
        .filter(|p| seen.insert(p.provider_id))
        .map(|p| StreamingOffer {
            provider_id: p.provider_id,
            provider_name: p.provider_name.clone(),
            logo_url: p.logo_path.as_deref().map(|path| image_url(LOGO_SIZE, path)),
        })
        .collect();

    Film {
        year: details.year(),
        tmdb_id: Some(tmdb_id),
        status: ResolutionStatus::Found,
        poster_url: details
            .poster_path
            .as_deref()
            .map(|path| image_url(POSTER_SIZE, path)),
        overview: details.overview.clone().filter(|o| !o.trim().is_empty()),
        runtime_minutes: details.runtime_minutes(),
        original_language: details
            .original_language
            .clone()
            .filter(|l| !l.trim().is_empty()),
        genres: details.genre_names(),
        offers,
        watch_link: regional.and_then(|r| r.link.clone()),
        region: Some(region.clone()),
        last_checked_at: Some(checked_at),
        ..Film::pending(reference)
    }
}

fn image_url(size: &str, path: &str) -> String {
    format!("{}/{}{}", IMAGE_BASE, size, path)
}

#[cfg(test)]
#[path = "tests/enrich_tests.rs"]
mod tests;
