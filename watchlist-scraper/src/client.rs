use async_trait::async_trait;
use tokio::time::Duration;

use crate::error::ScrapeError;

const BASE_URL: &str = "https://letterboxd.com";
const USER_AGENT: &str = "watchlist-sync/1.0 (self-hosted)";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of raw watchlist page HTML.
///
/// Implemented over HTTP by [`LetterboxdClient`]; tests substitute canned pages.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the body of watchlist page `page` (1-based) for `username`.
    async fn fetch_page(&self, username: &str, page: u32) -> Result<String, ScrapeError>;
}

/// HTTP client for public Letterboxd watchlist pages.
pub struct LetterboxdClient {
    http: reqwest::Client,
    base_url: String,
}

impl LetterboxdClient {
    pub fn new() -> Result<Self, ScrapeError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self {
            http,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Point the client at a different host (mirrors, local fixtures).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// URL of one watchlist page.
    pub fn page_url(&self, username: &str, page: u32) -> String {
        format!("{}/{}/watchlist/page/{}/", self.base_url, username, page)
    }
}

#[async_trait]
impl PageSource for LetterboxdClient {
    async fn fetch_page(&self, username: &str, page: u32) -> Result<String, ScrapeError> {
        let url = self.page_url(username, page);
        log::debug!("Fetching watchlist page {}", url);

        let resp = self.http.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url,
                status: status.as_u16(),
            });
        }

        Ok(resp.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_url_follows_site_pattern() {
        let client = LetterboxdClient::new().unwrap();
        assert_eq!(
            client.page_url("testuser", 3),
            "https://letterboxd.com/testuser/watchlist/page/3/"
        );
    }

    #[test]
    fn base_url_override_drops_trailing_slash() {
        let client = LetterboxdClient::new()
            .unwrap()
            .with_base_url("http://localhost:8080/");
        assert_eq!(
            client.page_url("u", 1),
            "http://localhost:8080/u/watchlist/page/1/"
        );
    }
}
