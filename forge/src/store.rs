//! Fragment store selection for commands.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use botforge_fragments::{DEFAULT_BUSY_TIMEOUT, FragmentStore, SqliteStore, TomlStore};
use clap::Args;
use eyre::{Context, Result};

const SQLITE_EXTENSIONS: [&str; 3] = ["sqlite", "sqlite3", "db"];

#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Fragment store: a SQLite database (.sqlite, .sqlite3, .db) or a TOML file.
    /// Defaults to the built-in fragments
    #[arg(long, env = "BOTFORGE_FRAGMENTS", value_name = "PATH")]
    pub fragments: Option<PathBuf>,

    /// How long SQLite lookups wait on a locked database
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_BUSY_TIMEOUT.as_millis() as u64)]
    pub store_timeout: u64,
}

/// Which backend a `--fragments` value selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreKind {
    Builtin,
    Sqlite(PathBuf),
    Toml(PathBuf),
}

impl StoreKind {
    pub fn for_path(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return StoreKind::Builtin;
        };

        let is_sqlite = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                SQLITE_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            });

        if is_sqlite {
            StoreKind::Sqlite(path.to_path_buf())
        } else {
            StoreKind::Toml(path.to_path_buf())
        }
    }
}

impl StoreArgs {
    pub fn kind(&self) -> StoreKind {
        StoreKind::for_path(self.fragments.as_deref())
    }

    /// Open the selected store once for the whole command.
    pub fn open(&self) -> Result<Box<dyn FragmentStore>> {
        let store = match self.kind() {
            StoreKind::Builtin => TomlStore::builtin().map(boxed),
            StoreKind::Sqlite(path) => SqliteStore::open_with_timeout(
                &path,
                Duration::from_millis(self.store_timeout),
            )
            .map(boxed),
            StoreKind::Toml(path) => TomlStore::open(&path).map(boxed),
        };
        let store = store.wrap_err("Failed to open fragment store")?;
        tracing::debug!(location = store.location(), "fragment store ready");
        Ok(store)
    }
}

fn boxed<S: FragmentStore + 'static>(store: S) -> Box<dyn FragmentStore> {
    Box::new(store)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn args(fragments: Option<PathBuf>) -> StoreArgs {
        StoreArgs {
            fragments,
            store_timeout: 100,
        }
    }

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(StoreKind::for_path(None), StoreKind::Builtin);
        for name in ["code_fragments.sqlite", "f.sqlite3", "f.db", "F.DB"] {
            assert_eq!(
                StoreKind::for_path(Some(Path::new(name))),
                StoreKind::Sqlite(PathBuf::from(name))
            );
        }
        for name in ["fragments.toml", "fragments", "db"] {
            assert_eq!(
                StoreKind::for_path(Some(Path::new(name))),
                StoreKind::Toml(PathBuf::from(name))
            );
        }
    }

    #[test]
    fn test_open_builtin() {
        let store = args(None).open().unwrap();
        assert_eq!(store.location(), "built-in fragments");
    }

    #[test]
    fn test_open_seeded_sqlite() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("code_fragments.db");
        botforge_fragments::seed_sqlite(&path, &TomlStore::builtin().unwrap()).unwrap();

        let store = args(Some(path)).open().unwrap();
        assert!(store.get("code_start").is_ok());
    }

    #[test]
    fn test_open_missing_toml_fails() {
        let temp = TempDir::new().unwrap();
        let err = args(Some(temp.path().join("missing.toml")))
            .open()
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "Failed to open fragment store");
    }
}
