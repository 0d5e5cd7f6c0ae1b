//! Store configuration and the configured open factory.
//!
//! Connection parameters are external configuration consumed at startup;
//! this module is the surface they arrive through. [`AgencyStore::open`]
//! covers the defaults, [`open_store`] the tunable path.
//!
//! [`AgencyStore::open`]: crate::AgencyStore::open

use std::path::Path;
use std::time::Duration;

use rusqlite::{Connection, OpenFlags};

use crate::{errors::AgencyStoreError, schema::ensure_schema, store::AgencyStore};

/// SQLite journal mode for file-backed stores.
///
/// Values map 1:1 to the `journal_mode` pragma. WAL is the default; DELETE
/// is the fallback for filesystems where WAL is unavailable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JournalMode {
    Wal,
    Delete,
}

impl JournalMode {
    fn pragma_value(self) -> &'static str {
        match self {
            JournalMode::Wal => "WAL",
            JournalMode::Delete => "DELETE",
        }
    }
}

/// Configuration for opening an agency store.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Whether to create the database file if it doesn't exist.
    ///
    /// When `false`, opening a missing path is a connection error instead.
    pub create_if_missing: bool,
    /// How long a statement waits on a locked database before failing.
    pub busy_timeout_ms: u64,
    /// Journal mode applied to file-backed stores.
    pub journal: JournalMode,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            create_if_missing: true,
            busy_timeout_ms: 5_000,
            journal: JournalMode::Wal,
        }
    }
}

/// Open a store at `path` with explicit configuration.
pub fn open_store<P: AsRef<Path>>(
    path: P,
    cfg: &StoreConfig,
) -> Result<AgencyStore, AgencyStoreError> {
    let mut flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    if cfg.create_if_missing {
        flags |= OpenFlags::SQLITE_OPEN_CREATE;
    }
    let conn = Connection::open_with_flags(path, flags)
        .map_err(|e| AgencyStoreError::connection(e.to_string()))?;
    conn.busy_timeout(Duration::from_millis(cfg.busy_timeout_ms))
        .map_err(|e| AgencyStoreError::connection(e.to_string()))?;
    ensure_schema(&conn)?;
    Ok(AgencyStore::from_connection_with_journal(
        conn,
        cfg.journal.pragma_value(),
    ))
}
