use std::collections::HashSet;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use watchlist_core::Film;

use crate::operations::{self, OperationError};
use crate::queries::{self, StatusCounts};
use crate::schema;

/// The persistence operations a refresh needs.
///
/// Each call is atomic on its own; a refresh is not one transaction, so
/// readers may observe a half-applied run.
pub trait FilmStore: Send + Sync {
    /// Insert or fully overwrite the film with the same slug. Returns its id.
    fn upsert(&self, film: &Film) -> Result<i64, OperationError>;

    /// All films sorted by title.
    fn list_all(&self) -> Result<Vec<Film>, OperationError>;

    /// Latest `last_checked_at` of any film.
    fn last_refreshed(&self) -> Result<Option<DateTime<Utc>>, OperationError>;

    /// Remove films whose slug is not in `slugs`. Returns how many went.
    fn delete_not_in(&self, slugs: &HashSet<String>) -> Result<usize, OperationError>;
}

/// [`FilmStore`] over a single SQLite connection.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (creating if needed) the database file at `path`.
    pub fn open(path: &Path) -> Result<Self, OperationError> {
        Ok(Self::from_connection(schema::open_database(path)?))
    }

    pub fn in_memory() -> Result<Self, OperationError> {
        Ok(Self::from_connection(schema::open_memory()?))
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    pub fn find(&self, slug: &str) -> Result<Option<Film>, OperationError> {
        let conn = self.conn()?;
        queries::find_film_by_slug(&conn, slug)
    }

    pub fn status_counts(&self) -> Result<StatusCounts, OperationError> {
        let conn = self.conn()?;
        queries::status_counts(&conn)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, OperationError> {
        self.conn.lock().map_err(|_| OperationError::LockPoisoned)
    }
}

impl FilmStore for SqliteStore {
    fn upsert(&self, film: &Film) -> Result<i64, OperationError> {
        let conn = self.conn()?;
        operations::upsert_film(&conn, film)
    }

    fn list_all(&self) -> Result<Vec<Film>, OperationError> {
        let conn = self.conn()?;
        queries::list_films(&conn)
    }

    fn last_refreshed(&self) -> Result<Option<DateTime<Utc>>, OperationError> {
        let conn = self.conn()?;
        queries::last_refreshed(&conn)
    }

    fn delete_not_in(&self, slugs: &HashSet<String>) -> Result<usize, OperationError> {
        if slugs.is_empty() {
            log::warn!("Reconciling against an empty watchlist; every stored film will be removed");
        }
        let conn = self.conn()?;
        operations::delete_films_not_in(&conn, slugs)
    }
}
