//! SQLite persistence for watchlist films.
//!
//! Films are keyed by slug. The refresh pipeline only sees the [`FilmStore`]
//! trait; [`SqliteStore`] is the shipped implementation.

pub mod operations;
pub mod queries;
pub mod schema;
pub mod store;

pub use operations::{delete_films_not_in, upsert_film, OperationError};
pub use queries::{find_film_by_slug, last_refreshed, list_films, status_counts, StatusCounts};
pub use schema::{open_database, open_memory, SchemaError};
pub use store::{FilmStore, SqliteStore};
