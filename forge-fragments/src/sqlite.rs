//! SQLite-backed fragment store.
//!
//! Fragments live in a single table:
//!
//! ```sql
//! CREATE TABLE fragments (id TEXT PRIMARY KEY, code TEXT NOT NULL);
//! ```

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use rusqlite::{Connection, OpenFlags, OptionalExtension, params};

use crate::{Fragment, FragmentError, FragmentStore, Result};

/// How long a query waits on a locked database before giving up.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS fragments (id TEXT PRIMARY KEY, code TEXT NOT NULL)";

/// Fragment store reading from a SQLite database opened read-only.
pub struct SqliteStore {
    conn: Connection,
    location: String,
}

impl SqliteStore {
    /// Open a fragment database with the default busy timeout.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_timeout(path, DEFAULT_BUSY_TIMEOUT)
    }

    /// Open a fragment database, failing queries that wait longer than `timeout`.
    pub fn open_with_timeout(path: impl AsRef<Path>, timeout: Duration) -> Result<Self> {
        let path = path.as_ref();
        let location = path.display().to_string();

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| FragmentError::unavailable(&location, e))?;

        conn.busy_timeout(timeout)
            .map_err(|e| FragmentError::unavailable(&location, e))?;

        // Fail at open time rather than on the first lookup
        conn.query_row("SELECT count(*) FROM fragments", [], |row| {
            row.get::<_, i64>(0)
        })
        .map_err(|e| FragmentError::unavailable(&location, e))?;

        tracing::debug!(store = %location, timeout_ms = timeout.as_millis() as u64, "opened sqlite fragment store");

        Ok(Self { conn, location })
    }
}

impl FragmentStore for SqliteStore {
    fn get(&self, id: &str) -> Result<Fragment> {
        let code: Option<String> = self
            .conn
            .query_row("SELECT code FROM fragments WHERE id = ?1", [id], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|e| FragmentError::unavailable(&self.location, e))?;

        match code {
            Some(code) => {
                tracing::debug!(id, store = %self.location, "fragment resolved");
                Fragment::parse(id, code)
            }
            None => Err(FragmentError::NotFound {
                id: id.to_string(),
                store: self.location.clone(),
            }),
        }
    }

    fn ids(&self) -> Result<Vec<String>> {
        let unavailable = |e: rusqlite::Error| FragmentError::unavailable(&self.location, e);

        let mut stmt = self
            .conn
            .prepare("SELECT id FROM fragments ORDER BY id")
            .map_err(unavailable)?;
        let ids = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(unavailable)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(unavailable)?;
        Ok(ids)
    }

    fn location(&self) -> &str {
        &self.location
    }
}

/// Write every fragment of `source` into the SQLite database at `path`.
///
/// Creates the database and table when missing and replaces rows with the
/// same id. Returns the number of fragments written.
pub fn seed_sqlite(path: impl AsRef<Path>, source: &dyn FragmentStore) -> Result<usize> {
    let path: PathBuf = path.as_ref().to_path_buf();
    let location = path.display().to_string();
    let unavailable = |e: rusqlite::Error| FragmentError::unavailable(&location, e);

    let mut conn = Connection::open(&path).map_err(unavailable)?;
    conn.execute_batch(SCHEMA).map_err(unavailable)?;

    let ids = source.ids()?;
    let tx = conn.transaction().map_err(unavailable)?;
    for id in &ids {
        let fragment = source.get(id)?;
        tx.execute(
            "INSERT OR REPLACE INTO fragments (id, code) VALUES (?1, ?2)",
            params![id, fragment.template()],
        )
        .map_err(unavailable)?;
    }
    tx.commit().map_err(unavailable)?;

    tracing::info!(store = %location, count = ids.len(), "seeded sqlite fragment store");
    Ok(ids.len())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::TomlStore;

    fn seeded(temp: &TempDir) -> PathBuf {
        let path = temp.path().join("fragments.sqlite");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        conn.execute(
            "INSERT INTO fragments (id, code) VALUES (?1, ?2)",
            params!["launch", "if __name__ == '__main__':\n{own_code}"],
        )
        .unwrap();
        path
    }

    #[test]
    fn test_get_existing_fragment() {
        let temp = TempDir::new().unwrap();
        let store = SqliteStore::open(seeded(&temp)).unwrap();

        let fragment = store.get("launch").unwrap();
        assert_eq!(fragment.id(), "launch");
        assert_eq!(fragment.slots()[0].name, "own_code");
    }

    #[test]
    fn test_missing_fragment_is_not_found() {
        let temp = TempDir::new().unwrap();
        let store = SqliteStore::open(seeded(&temp)).unwrap();

        let err = store.get("trigger").unwrap_err();
        assert!(matches!(err, FragmentError::NotFound { ref id, .. } if id == "trigger"));
    }

    #[test]
    fn test_missing_database_is_unavailable() {
        let temp = TempDir::new().unwrap();
        let err = SqliteStore::open(temp.path().join("nope.sqlite"))
            .err()
            .unwrap();
        assert!(err.is_unavailable());
    }

    #[test]
    fn test_database_without_table_is_unavailable() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.sqlite");
        Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE other (x INTEGER)")
            .unwrap();

        let err = SqliteStore::open(&path).err().unwrap();
        assert!(err.is_unavailable());
    }

    #[test]
    fn test_seed_from_builtin() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("seeded.sqlite");
        let builtin = TomlStore::builtin().unwrap();

        let count = seed_sqlite(&path, &builtin).unwrap();
        let store = SqliteStore::open(&path).unwrap();

        assert_eq!(count, builtin.ids().unwrap().len());
        assert_eq!(store.ids().unwrap(), builtin.ids().unwrap());
        assert_eq!(
            store.get("code_start").unwrap().template(),
            builtin.get("code_start").unwrap().template()
        );
    }
}
