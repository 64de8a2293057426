//! Shared data model for the watchlist refresh pipeline.
//!
//! Every other crate in the workspace speaks in these types: the scraper
//! produces [`Reference`]s, the enricher turns them into [`Film`]s, and the
//! store persists them.

pub mod film;
pub mod region;

pub use film::{DEFAULT_SOURCE, Film, Reference, ResolutionStatus, StatusParseError, StreamingOffer};
pub use region::{Region, RegionParseError};
