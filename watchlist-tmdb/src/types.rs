use std::collections::HashMap;

use serde::Deserialize;

/// Response from `/search/movie`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

impl SearchResponse {
    /// TMDB id of the best (first) match, if any.
    pub fn first_id(&self) -> Option<i64> {
        self.results.first().map(|r| r.id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

/// Response from `/movie/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieDetails {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub runtime: Option<i32>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

impl MovieDetails {
    /// Release year from a `YYYY-MM-DD` date. `None` unless the first four
    /// characters are all digits.
    pub fn year(&self) -> Option<i32> {
        let date = self.release_date.as_deref()?;
        let prefix = date.get(..4)?;
        if prefix.chars().all(|c| c.is_ascii_digit()) {
            prefix.parse().ok()
        } else {
            None
        }
    }

    /// Genre names in API order.
    pub fn genre_names(&self) -> Vec<String> {
        self.genres.iter().map(|g| g.name.clone()).collect()
    }

    /// Runtime in minutes; TMDB reports 0 for unknown runtimes.
    pub fn runtime_minutes(&self) -> Option<i32> {
        self.runtime.filter(|&m| m > 0)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Genre {
    pub name: String,
}

/// Response from `/movie/{id}/watch/providers`, keyed by region code.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WatchProvidersResponse {
    #[serde(default)]
    pub results: HashMap<String, RegionProviders>,
}

impl WatchProvidersResponse {
    /// Providers for one region. A missing region is not an error.
    pub fn for_region(&self, region: &str) -> Option<&RegionProviders> {
        self.results.get(region)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegionProviders {
    #[serde(default)]
    pub link: Option<String>,
    /// Subscription providers. Rent/buy offers are not tracked.
    #[serde(default)]
    pub flatrate: Vec<Provider>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Provider {
    pub provider_id: i64,
    pub provider_name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
