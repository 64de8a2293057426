pub mod client;
pub mod enrich;
pub mod error;
pub mod types;

pub use client::{CatalogApi, TmdbClient};
pub use enrich::{Enricher, MAX_CONCURRENT_REQUESTS};
pub use error::TmdbError;
pub use types::{MovieDetails, SearchResponse, WatchProvidersResponse};
