//! Write operations on the films table.

use std::collections::HashSet;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection};
use thiserror::Error;
use watchlist_core::Film;

use crate::schema::SchemaError;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("JSON column error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),
    #[error("Database connection lock was poisoned")]
    LockPoisoned,
    #[error("Invalid timestamp '{0}' in last_checked")]
    InvalidTimestamp(String),
    #[error("Invalid value '{value}' in column {column}")]
    InvalidValue { column: &'static str, value: String },
}

// ── Film Operations ─────────────────────────────────────────────────────────

/// Insert a film, or overwrite every column of the row with the same slug.
///
/// Returns the row id, which is stable across updates.
pub fn upsert_film(conn: &Connection, film: &Film) -> Result<i64, OperationError> {
    let genres = serde_json::to_string(&film.genres)?;
    let offers = serde_json::to_string(&film.offers)?;

    let id = conn.query_row(
        "INSERT INTO films (slug, title, year, tmdb_id, tmdb_status, poster_url, overview,
                            runtime_minutes, original_language, genres, streaming_platforms,
                            watch_link, country, last_checked, source)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
         ON CONFLICT(slug) DO UPDATE SET
             title = excluded.title,
             year = excluded.year,
             tmdb_id = excluded.tmdb_id,
             tmdb_status = excluded.tmdb_status,
             poster_url = excluded.poster_url,
             overview = excluded.overview,
             runtime_minutes = excluded.runtime_minutes,
             original_language = excluded.original_language,
             genres = excluded.genres,
             streaming_platforms = excluded.streaming_platforms,
             watch_link = excluded.watch_link,
             country = excluded.country,
             last_checked = excluded.last_checked,
             source = excluded.source
         RETURNING id",
        params![
            film.slug,
            film.title,
            film.year,
            film.tmdb_id,
            film.status.as_str(),
            film.poster_url,
            film.overview,
            film.runtime_minutes,
            film.original_language,
            genres,
            offers,
            film.watch_link,
            film.region.as_ref().map(|r| r.code()),
            film.last_checked_at.map(format_timestamp),
            film.source,
        ],
        |row| row.get(0),
    )?;

    Ok(id)
}

/// Delete every film whose slug is not in `keep`. Returns the number removed.
///
/// An empty `keep` set empties the table.
pub fn delete_films_not_in(
    conn: &Connection,
    keep: &HashSet<String>,
) -> Result<usize, OperationError> {
    let slugs = serde_json::to_string(&keep.iter().collect::<Vec<_>>())?;
    let removed = conn.execute(
        "DELETE FROM films WHERE slug NOT IN (SELECT value FROM json_each(?1))",
        params![slugs],
    )?;
    Ok(removed)
}

// ── Timestamps ──────────────────────────────────────────────────────────────

/// Fixed-width RFC 3339 in UTC, e.g. `2024-03-01T12:00:00.000Z`.
pub(crate) fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, OperationError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| OperationError::InvalidTimestamp(raw.to_string()))
}
