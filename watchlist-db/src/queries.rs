//! Read queries for the film database.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use watchlist_core::{Film, Region, ResolutionStatus};

use crate::operations::{parse_timestamp, OperationError};

const FILM_COLUMNS: &str = "id, slug, title, year, tmdb_id, tmdb_status, poster_url, overview,
                            runtime_minutes, original_language, genres, streaming_platforms,
                            watch_link, country, last_checked, source";

// ── Film Lookups ────────────────────────────────────────────────────────────

/// All films, sorted by title.
pub fn list_films(conn: &Connection) -> Result<Vec<Film>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {FILM_COLUMNS} FROM films ORDER BY title COLLATE NOCASE, slug"
    ))?;
    let rows = stmt.query_map([], row_to_film_row)?;
    rows.map(|row| Film::try_from(row?)).collect()
}

/// Find one film by slug.
pub fn find_film_by_slug(conn: &Connection, slug: &str) -> Result<Option<Film>, OperationError> {
    let row = conn
        .query_row(
            &format!("SELECT {FILM_COLUMNS} FROM films WHERE slug = ?1"),
            params![slug],
            row_to_film_row,
        )
        .optional()?;
    row.map(Film::try_from).transpose()
}

/// Most recent `last_checked` across all films, or `None` for an empty table.
pub fn last_refreshed(conn: &Connection) -> Result<Option<DateTime<Utc>>, OperationError> {
    let raw: Option<String> =
        conn.query_row("SELECT MAX(last_checked) FROM films", [], |row| row.get(0))?;
    raw.as_deref().map(parse_timestamp).transpose()
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Film counts per resolution status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: usize,
    pub found: usize,
    pub not_found: usize,
    pub error: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.pending + self.found + self.not_found + self.error
    }
}

pub fn status_counts(conn: &Connection) -> Result<StatusCounts, OperationError> {
    let mut stmt =
        conn.prepare("SELECT tmdb_status, COUNT(*) FROM films GROUP BY tmdb_status")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
    })?;

    let mut counts = StatusCounts::default();
    for row in rows {
        let (raw, count) = row?;
        let status = parse_status(raw)?;
        let count = count as usize;
        match status {
            ResolutionStatus::Pending => counts.pending += count,
            ResolutionStatus::Found => counts.found += count,
            ResolutionStatus::NotFound => counts.not_found += count,
            ResolutionStatus::Error => counts.error += count,
        }
    }
    Ok(counts)
}

// ── Row Mapping ─────────────────────────────────────────────────────────────

/// Raw column values, converted to a [`Film`] outside the rusqlite closure so
/// JSON and timestamp failures surface as [`OperationError`]s.
struct FilmRow {
    id: i64,
    slug: String,
    title: String,
    year: Option<i32>,
    tmdb_id: Option<i64>,
    status: String,
    poster_url: Option<String>,
    overview: Option<String>,
    runtime_minutes: Option<i32>,
    original_language: Option<String>,
    genres: String,
    offers: String,
    watch_link: Option<String>,
    country: Option<String>,
    last_checked: Option<String>,
    source: String,
}

fn row_to_film_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<FilmRow> {
    Ok(FilmRow {
        id: row.get(0)?,
        slug: row.get(1)?,
        title: row.get(2)?,
        year: row.get(3)?,
        tmdb_id: row.get(4)?,
        status: row.get(5)?,
        poster_url: row.get(6)?,
        overview: row.get(7)?,
        runtime_minutes: row.get(8)?,
        original_language: row.get(9)?,
        genres: row.get(10)?,
        offers: row.get(11)?,
        watch_link: row.get(12)?,
        country: row.get(13)?,
        last_checked: row.get(14)?,
        source: row.get(15)?,
    })
}

impl TryFrom<FilmRow> for Film {
    type Error = OperationError;

    fn try_from(row: FilmRow) -> Result<Self, Self::Error> {
        let region = row
            .country
            .map(|code| {
                code.parse::<Region>().map_err(|_| OperationError::InvalidValue {
                    column: "country",
                    value: code,
                })
            })
            .transpose()?;

        Ok(Film {
            id: Some(row.id),
            slug: row.slug,
            title: row.title,
            year: row.year,
            tmdb_id: row.tmdb_id,
            status: parse_status(row.status)?,
            poster_url: row.poster_url,
            overview: row.overview,
            runtime_minutes: row.runtime_minutes,
            original_language: row.original_language,
            genres: serde_json::from_str(&row.genres)?,
            offers: serde_json::from_str(&row.offers)?,
            watch_link: row.watch_link,
            region,
            last_checked_at: row.last_checked.as_deref().map(parse_timestamp).transpose()?,
            source: row.source,
        })
    }
}

fn parse_status(raw: String) -> Result<ResolutionStatus, OperationError> {
    raw.parse().map_err(|_| OperationError::InvalidValue {
        column: "tmdb_status",
        value: raw,
    })
}
