use rusqlite::{Connection, OptionalExtension};

use crate::errors::AgencyStoreError;

pub const BASE_SCHEMA_VERSION: i64 = 1;

struct MigrationStep {
    target_version: i64,
    statements: &'static [&'static str],
}

const MIGRATION_STEPS: &[MigrationStep] = &[MigrationStep {
    target_version: 2,
    statements: &[
        "CREATE INDEX IF NOT EXISTS idx_orders_status ON orders(status)",
        "CREATE INDEX IF NOT EXISTS idx_orders_date ON orders(orderdate)",
    ],
}];

pub const SCHEMA_VERSION: i64 = BASE_SCHEMA_VERSION + MIGRATION_STEPS.len() as i64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    pub from_version: i64,
    pub to_version: i64,
    pub statements: Vec<&'static str>,
    pub dry_run: bool,
}

pub fn ensure_schema(conn: &Connection) -> Result<(), AgencyStoreError> {
    ensure_base_schema(conn)?;
    ensure_meta(conn)?;
    run_pending_migrations(conn, false)?;
    Ok(())
}

pub fn ensure_schema_without_migrations(conn: &Connection) -> Result<(), AgencyStoreError> {
    ensure_base_schema(conn)?;
    ensure_meta(conn)?;
    Ok(())
}

fn ensure_base_schema(conn: &Connection) -> Result<(), AgencyStoreError> {
    conn.execute_batch(
        r#"
        PRAGMA foreign_keys = ON;
        CREATE TABLE IF NOT EXISTS clients (
            clientid INTEGER PRIMARY KEY AUTOINCREMENT,
            name     TEXT NOT NULL,
            email    TEXT NOT NULL UNIQUE,
            phone    TEXT
        );
        CREATE TABLE IF NOT EXISTS tours (
            tourid  INTEGER PRIMARY KEY AUTOINCREMENT,
            name    TEXT NOT NULL,
            country TEXT NOT NULL,
            price   INTEGER NOT NULL
        );
        CREATE TABLE IF NOT EXISTS orders (
            orderid     INTEGER PRIMARY KEY AUTOINCREMENT,
            clientid    INTEGER NOT NULL REFERENCES clients(clientid) ON DELETE CASCADE,
            tourid      INTEGER NOT NULL REFERENCES tours(tourid) ON DELETE CASCADE,
            orderdate   TEXT NOT NULL,
            status      TEXT NOT NULL,
            peoplecount INTEGER NOT NULL,
            discount    INTEGER
        );
        CREATE INDEX IF NOT EXISTS idx_orders_client ON orders(clientid);
        CREATE INDEX IF NOT EXISTS idx_orders_tour ON orders(tourid);
        CREATE TABLE IF NOT EXISTS agency_meta (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            schema_version INTEGER NOT NULL
        );
        "#,
    )
    .map_err(|e| AgencyStoreError::schema(e.to_string()))
}

pub fn read_schema_version(conn: &Connection) -> Result<i64, AgencyStoreError> {
    conn.query_row(
        "SELECT schema_version FROM agency_meta WHERE id=1",
        [],
        |row| row.get(0),
    )
    .map_err(|e| AgencyStoreError::schema(e.to_string()))
}

pub fn run_pending_migrations(
    conn: &Connection,
    dry_run: bool,
) -> Result<MigrationReport, AgencyStoreError> {
    let current = read_schema_version(conn)?;
    let mut statements: Vec<&'static str> = Vec::new();
    let mut target = current;
    for step in MIGRATION_STEPS {
        if step.target_version > current {
            target = step.target_version;
            statements.extend_from_slice(step.statements);
        }
    }
    if statements.is_empty() {
        return Ok(MigrationReport {
            from_version: current,
            to_version: current,
            statements,
            dry_run,
        });
    }
    if dry_run {
        return Ok(MigrationReport {
            from_version: current,
            to_version: target,
            statements,
            dry_run,
        });
    }
    conn.execute("BEGIN IMMEDIATE", [])
        .map_err(|e| AgencyStoreError::schema(e.to_string()))?;
    let result: Result<(), AgencyStoreError> = (|| {
        for sql in statements.iter().copied() {
            conn.execute(sql, [])
                .map_err(|e| AgencyStoreError::schema(e.to_string()))?;
        }
        conn.execute(
            "UPDATE agency_meta SET schema_version=?1 WHERE id=1",
            [target],
        )
        .map_err(|e| AgencyStoreError::schema(e.to_string()))?;
        Ok(())
    })();
    match result {
        Ok(()) => {
            conn.execute("COMMIT", [])
                .map_err(|e| AgencyStoreError::schema(e.to_string()))?;
        }
        Err(err) => {
            let _ = conn.execute("ROLLBACK", []);
            return Err(err);
        }
    }
    Ok(MigrationReport {
        from_version: current,
        to_version: target,
        statements,
        dry_run,
    })
}

fn ensure_meta(conn: &Connection) -> Result<(), AgencyStoreError> {
    let version: Option<i64> = conn
        .query_row(
            "SELECT schema_version FROM agency_meta WHERE id=1",
            [],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| AgencyStoreError::schema(e.to_string()))?;
    match version {
        Some(existing) => {
            if existing > SCHEMA_VERSION {
                return Err(AgencyStoreError::schema(format!(
                    "database schema version {existing} is newer than supported {SCHEMA_VERSION}"
                )));
            }
            if existing < BASE_SCHEMA_VERSION {
                conn.execute(
                    "UPDATE agency_meta SET schema_version=?1 WHERE id=1",
                    [BASE_SCHEMA_VERSION],
                )
                .map_err(|e| AgencyStoreError::schema(e.to_string()))?;
            }
        }
        None => {
            conn.execute(
                "INSERT INTO agency_meta(id, schema_version) VALUES(1, ?1)",
                [BASE_SCHEMA_VERSION],
            )
            .map_err(|e| AgencyStoreError::schema(e.to_string()))?;
        }
    }
    Ok(())
}
