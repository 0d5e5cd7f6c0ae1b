//! Core AgencyStore struct and construction functionality.

use std::path::Path;

use rusqlite::Connection;
use tracing::warn;

use crate::{
    errors::AgencyStoreError,
    schema::{ensure_schema, read_schema_version, run_pending_migrations, MigrationReport},
};

use super::metrics::{InstrumentedConnection, StatementTracker, StoreMetrics};

/// Embedded SQLite-backed data store for a tourist agency.
///
/// Owns the connection lifecycle and the schema, and exposes every mutation,
/// retrieval, and filtered-search operation over clients, tours, and orders.
#[derive(Debug)]
pub struct AgencyStore {
    pub(crate) conn: Connection,
    pub(crate) metrics: StoreMetrics,
    pub(crate) statement_tracker: StatementTracker,
}

// Helper function to check if connection is in-memory
fn is_in_memory_connection(conn: &Connection) -> bool {
    match conn.pragma_query_value(None, "database_list", |row| {
        let name: String = row.get(1)?;
        Ok(name)
    }) {
        Ok(name) => name.is_empty() || name == ":memory:",
        Err(_) => true,
    }
}

impl AgencyStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, AgencyStoreError> {
        let conn =
            Connection::open(path).map_err(|e| AgencyStoreError::connection(e.to_string()))?;
        ensure_schema(&conn)?;
        Ok(Self::from_connection(conn))
    }

    pub fn open_without_migrations<P: AsRef<Path>>(path: P) -> Result<Self, AgencyStoreError> {
        let conn =
            Connection::open(path).map_err(|e| AgencyStoreError::connection(e.to_string()))?;
        crate::schema::ensure_schema_without_migrations(&conn)?;
        Ok(Self::from_connection(conn))
    }

    pub fn open_in_memory() -> Result<Self, AgencyStoreError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| AgencyStoreError::connection(e.to_string()))?;
        ensure_schema(&conn)?;
        Ok(Self::from_connection(conn))
    }

    pub(crate) fn from_connection(conn: Connection) -> Self {
        Self::from_connection_with_journal(conn, "WAL")
    }

    pub(crate) fn from_connection_with_journal(conn: Connection, journal: &str) -> Self {
        conn.set_prepared_statement_cache_capacity(64);

        // Journal and cache tuning only applies to file-backed databases.
        if !is_in_memory_connection(&conn) {
            if conn.pragma_update(None, "journal_mode", journal).is_err() {
                let _ = conn.pragma_update(None, "journal_mode", "DELETE");
            }
            let _ = conn.pragma_update(None, "synchronous", "NORMAL");
            let _ = conn.pragma_update(None, "temp_store", "MEMORY");
        }

        Self {
            conn,
            metrics: StoreMetrics::default(),
            statement_tracker: StatementTracker::default(),
        }
    }

    pub fn metrics_snapshot(&self) -> super::metrics::StoreMetricsSnapshot {
        self.metrics.snapshot()
    }

    pub fn reset_metrics(&self) {
        self.metrics.reset();
    }

    pub fn schema_version(&self) -> Result<i64, AgencyStoreError> {
        read_schema_version(&self.conn)
    }

    pub fn run_pending_migrations(
        &self,
        dry_run: bool,
    ) -> Result<MigrationReport, AgencyStoreError> {
        run_pending_migrations(&self.conn, dry_run)
    }

    pub(crate) fn connection(&self) -> InstrumentedConnection<'_> {
        InstrumentedConnection::new(&self.conn, &self.metrics, &self.statement_tracker)
    }

    /// Run one mutation as a unit-of-work: BEGIN IMMEDIATE, commit on
    /// success, roll back and surface the error on failure. The rollback
    /// path also emits a diagnostic identifying the operation.
    pub(crate) fn write_tx<T>(
        &self,
        operation: &str,
        body: impl FnOnce(&InstrumentedConnection<'_>) -> Result<T, AgencyStoreError>,
    ) -> Result<T, AgencyStoreError> {
        let conn = self.connection();
        conn.execute("BEGIN IMMEDIATE", [])
            .map_err(|e| AgencyStoreError::transaction(e.to_string()))?;
        match body(&conn) {
            Ok(value) => {
                conn.execute("COMMIT", [])
                    .map_err(|e| AgencyStoreError::transaction(e.to_string()))?;
                Ok(value)
            }
            Err(err) => {
                let _ = conn.execute("ROLLBACK", []);
                warn!(operation, error = %err, "write rolled back");
                Err(err)
            }
        }
    }
}
