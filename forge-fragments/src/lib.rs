//! Code fragments for the botforge generator.
//!
//! A fragment is a named template with typed slots. Fragments are read
//! from a [`FragmentStore`]: a SQLite database ([`SqliteStore`]), a TOML
//! document ([`TomlStore`]) or the built-in set ([`TomlStore::builtin`]).

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod sqlite;
mod store;
mod template;
mod toml_store;

pub use error::{FragmentError, Result, StoreCause};
pub use sqlite::{DEFAULT_BUSY_TIMEOUT, SqliteStore, seed_sqlite};
pub use store::FragmentStore;
pub use template::{Fragment, Slot, Slots};
pub use toml_store::TomlStore;

/// Fragment ids the generator resolves.
pub mod ids {
    /// Class skeleton: header, imports, class statement and `__init__`.
    pub const CODE_START: &str = "code_start";
    /// Default body of `__init__`.
    pub const DEF_INIT: &str = "def_init";
    /// Wrapper for caller code that computes notification recipients.
    pub const USER_LIST_FUNC: &str = "user_list_func";
    /// Notification trigger method.
    pub const TRIGGER: &str = "trigger";
    /// `if __name__ == '__main__':` entry point.
    pub const LAUNCH: &str = "launch";
}
