/// Errors from a single TMDB request.
///
/// These never escape enrichment: the enricher turns them into a film's
/// `error` status.
#[derive(Debug, thiserror::Error)]
pub enum TmdbError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TMDB rejected the API key")]
    InvalidApiKey,

    #[error("Rate limited by TMDB API")]
    RateLimit,

    #[error("Server error (HTTP {status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}
