use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::region::Region;

/// Provenance tag written on every film scraped from the watchlist site.
pub const DEFAULT_SOURCE: &str = "letterboxd";

/// One watchlist entry as scraped, before any catalog lookup.
///
/// `slug` is the site's stable identifier for the film; it is the key the
/// store upserts and reconciles on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    pub slug: String,
    pub title: String,
}

impl Reference {
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
        }
    }
}

/// A subscription streaming offer in one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamingOffer {
    pub provider_id: i64,
    pub provider_name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// How far the catalog lookup got for a film.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStatus {
    /// Not looked up yet.
    #[default]
    Pending,
    /// Catalog id resolved and details fetched.
    Found,
    /// Title search returned no results.
    NotFound,
    /// A catalog call failed.
    Error,
}

impl ResolutionStatus {
    /// Returns the storage/wire form of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Found => "found",
            Self::NotFound => "not_found",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for ResolutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resolution status: '{0}'")]
pub struct StatusParseError(pub String);

impl std::str::FromStr for ResolutionStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "found" => Ok(Self::Found),
            "not_found" => Ok(Self::NotFound),
            "error" => Ok(Self::Error),
            other => Err(StatusParseError(other.to_string())),
        }
    }
}

/// A watchlist film merged with its catalog metadata.
///
/// Films are only ever written whole: the refresh pipeline builds a complete
/// record per reference and the store overwrites every column on conflict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Film {
    /// Storage key, assigned by the store. `None` until first persisted.
    pub id: Option<i64>,
    pub slug: String,
    pub title: String,
    pub year: Option<i32>,
    pub tmdb_id: Option<i64>,
    pub status: ResolutionStatus,
    pub poster_url: Option<String>,
    pub overview: Option<String>,
    pub runtime_minutes: Option<i32>,
    pub original_language: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub offers: Vec<StreamingOffer>,
    pub watch_link: Option<String>,
    pub region: Option<Region>,
    pub last_checked_at: Option<DateTime<Utc>>,
    pub source: String,
}

impl Film {
    /// A not-yet-enriched film for a scraped reference.
    pub fn pending(reference: &Reference) -> Self {
        Self {
            id: None,
            slug: reference.slug.clone(),
            title: reference.title.clone(),
            year: None,
            tmdb_id: None,
            status: ResolutionStatus::Pending,
            poster_url: None,
            overview: None,
            runtime_minutes: None,
            original_language: None,
            genres: Vec::new(),
            offers: Vec::new(),
            watch_link: None,
            region: None,
            last_checked_at: None,
            source: DEFAULT_SOURCE.to_string(),
        }
    }

    /// A film with no metadata, tagged with `status` and checked at `checked_at`.
    pub fn with_status(
        reference: &Reference,
        status: ResolutionStatus,
        tmdb_id: Option<i64>,
        region: &Region,
        checked_at: DateTime<Utc>,
    ) -> Self {
        Self {
            tmdb_id,
            status,
            region: Some(region.clone()),
            last_checked_at: Some(checked_at),
            ..Self::pending(reference)
        }
    }

    /// True when the catalog lookup resolved this film.
    pub fn is_found(&self) -> bool {
        self.status == ResolutionStatus::Found
    }
}

#[cfg(test)]
#[path = "tests/film_tests.rs"]
mod tests;
