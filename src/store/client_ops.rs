//! Client CRUD operations for AgencyStore.

use rusqlite::{params, OptionalExtension};

use crate::errors::{map_sqlite_err, AgencyStoreError};

use super::{
    types::{row_to_client, validate_client_input, Client},
    AgencyStore,
};

impl AgencyStore {
    /// Insert a new client and return its id.
    ///
    /// A duplicate email surfaces as
    /// [`AgencyStoreError::ConstraintViolation`]; no row is added and the
    /// existing client is left intact.
    pub fn add_client(
        &self,
        name: &str,
        email: &str,
        phone: Option<&str>,
    ) -> Result<i64, AgencyStoreError> {
        validate_client_input(name, email)?;
        self.write_tx("add_client", |conn| {
            conn.execute(
                "INSERT INTO clients(name, email, phone) VALUES(?1, ?2, ?3)",
                params![name, email, phone],
            )
            .map_err(map_sqlite_err)?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_client(&self, id: i64) -> Result<Option<Client>, AgencyStoreError> {
        self.connection()
            .query_row(
                "SELECT clientid, name, email, phone FROM clients WHERE clientid=?1",
                params![id],
                row_to_client,
            )
            .optional()
            .map_err(|e| AgencyStoreError::query(e.to_string()))
    }

    pub fn get_all_clients(&self) -> Result<Vec<Client>, AgencyStoreError> {
        let conn = self.connection();
        let mut stmt = conn
            .prepare_cached("SELECT clientid, name, email, phone FROM clients ORDER BY clientid")
            .map_err(|e| AgencyStoreError::query(e.to_string()))?;
        let rows = stmt
            .query_map([], row_to_client)
            .map_err(|e| AgencyStoreError::query(e.to_string()))?;
        let mut clients = Vec::new();
        for client in rows {
            clients.push(client.map_err(|e| AgencyStoreError::query(e.to_string()))?);
        }
        Ok(clients)
    }

    /// Overwrite a client's name, email, and phone.
    ///
    /// Returns `Ok(false)` when no client has the given id; an unknown id is
    /// a no-op, not an error.
    pub fn update_client(
        &self,
        id: i64,
        name: &str,
        email: &str,
        phone: Option<&str>,
    ) -> Result<bool, AgencyStoreError> {
        validate_client_input(name, email)?;
        self.write_tx("update_client", |conn| {
            let affected = conn
                .execute(
                    "UPDATE clients SET name=?1, email=?2, phone=?3 WHERE clientid=?4",
                    params![name, email, phone, id],
                )
                .map_err(map_sqlite_err)?;
            Ok(affected > 0)
        })
    }

    /// Delete a client and, by cascade, every order that references it.
    ///
    /// Returns `Ok(false)` when no client has the given id.
    pub fn delete_client(&self, id: i64) -> Result<bool, AgencyStoreError> {
        self.write_tx("delete_client", |conn| {
            let affected = conn
                .execute("DELETE FROM clients WHERE clientid=?1", params![id])
                .map_err(map_sqlite_err)?;
            Ok(affected > 0)
        })
    }
}
