use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio::time::Duration;

use crate::error::TmdbError;
use crate::types::{MovieDetails, SearchResponse, WatchProvidersResponse};

const BASE_URL: &str = "https://api.themoviedb.org/3";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The three TMDB endpoints enrichment needs.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Search movies by title.
    async fn search_movie(&self, title: &str) -> Result<SearchResponse, TmdbError>;

    /// Fetch poster, release date, genres and friends for one movie.
    async fn movie_details(&self, tmdb_id: i64) -> Result<MovieDetails, TmdbError>;

    /// Fetch streaming availability for one movie, all regions.
    async fn watch_providers(&self, tmdb_id: i64) -> Result<WatchProvidersResponse, TmdbError>;
}

/// HTTP client for the TMDB v3 API.
pub struct TmdbClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl TmdbClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, TmdbError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, TmdbError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(TmdbError::InvalidApiKey);
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TmdbError::RateLimit);
        }

        let text = resp.text().await?;
        if !status.is_success() {
            return Err(TmdbError::ServerError {
                status: status.as_u16(),
                message: text.chars().take(200).collect(),
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl CatalogApi for TmdbClient {
    async fn search_movie(&self, title: &str) -> Result<SearchResponse, TmdbError> {
        self.get_json("/search/movie", &[("query", title)]).await
    }

    async fn movie_details(&self, tmdb_id: i64) -> Result<MovieDetails, TmdbError> {
        self.get_json(&format!("/movie/{}", tmdb_id), &[]).await
    }

    async fn watch_providers(&self, tmdb_id: i64) -> Result<WatchProvidersResponse, TmdbError> {
        self.get_json(&format!("/movie/{}/watch/providers", tmdb_id), &[])
            .await
    }
}
