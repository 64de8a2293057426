/// Errors that abort a watchlist scrape.
/// Any failed page fetch is fatal to the whole scrape.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Watchlist page {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}
