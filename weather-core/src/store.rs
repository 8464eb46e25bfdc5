//! SQLite-backed city list.
//!
//! Name uniqueness is enforced by a `UNIQUE` constraint, so two racing
//! inserts of the same new city cannot both succeed.

use parking_lot::Mutex;
use rusqlite::{Connection, ErrorCode, OptionalExtension, params};
use std::path::Path;

use crate::{
    error::{Error, Result},
    model::City,
};

/// Persisted set of tracked cities.
pub struct CityStore {
    conn: Mutex<Connection>,
}

impl std::fmt::Debug for CityStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CityStore").finish_non_exhaustive()
    }
}

impl CityStore {
    /// Open or create the database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// In-memory store, used by tests and `weather show`.
    pub fn in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS cities (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE
            );",
        )?;

        Ok(Self { conn: Mutex::new(conn) })
    }

    pub fn find_by_name(&self, name: &str) -> Result<Option<City>> {
        let conn = self.conn.lock();
        let city = conn
            .query_row(
                "SELECT id, name FROM cities WHERE name = ?1",
                params![name],
                |row| Ok(City { id: row.get(0)?, name: row.get(1)? }),
            )
            .optional()?;

        Ok(city)
    }

    /// Insert a new city; fails with [`Error::DuplicateCity`] if the name exists.
    pub fn insert(&self, name: &str) -> Result<City> {
        let conn = self.conn.lock();
        match conn.execute("INSERT INTO cities (name) VALUES (?1)", params![name]) {
            Ok(_) => Ok(City {
                id: conn.last_insert_rowid(),
                name: name.to_string(),
            }),
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                Err(Error::DuplicateCity(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// All cities in insertion order.
    pub fn list_all(&self) -> Result<Vec<City>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare("SELECT id, name FROM cities ORDER BY id")?;
        let cities = stmt
            .query_map([], |row| Ok(City { id: row.get(0)?, name: row.get(1)? }))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(cities)
    }

    /// Returns whether a row was removed; deleting an unknown id is not an error.
    pub fn delete_by_id(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock();
        let removed = conn.execute("DELETE FROM cities WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }
}
