//! Letterboxd watchlist scraper.
//!
//! Pages are fetched one at a time through a [`PageSource`] and parsed with
//! two markup strategies so a site redesign does not silently empty the
//! watchlist.

pub mod client;
pub mod error;
pub mod fetch;
pub mod parse;

pub use client::{LetterboxdClient, PageSource};
pub use error::ScrapeError;
pub use fetch::{DEFAULT_PAGE_DELAY, fetch_watchlist};
pub use parse::{WatchlistPage, component_references, legacy_references, parse_watchlist_page};
