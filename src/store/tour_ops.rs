//! Tour operations for AgencyStore.

use rusqlite::{params, OptionalExtension};

use crate::errors::{map_sqlite_err, AgencyStoreError};

use super::{
    types::{row_to_tour, validate_tour_input, Decimal, Tour},
    AgencyStore,
};

impl AgencyStore {
    pub fn add_tour(
        &self,
        name: &str,
        country: &str,
        price: Decimal,
    ) -> Result<i64, AgencyStoreError> {
        validate_tour_input(name, country, price)?;
        self.write_tx("add_tour", |conn| {
            conn.execute(
                "INSERT INTO tours(name, country, price) VALUES(?1, ?2, ?3)",
                params![name, country, price],
            )
            .map_err(map_sqlite_err)?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_tour(&self, id: i64) -> Result<Option<Tour>, AgencyStoreError> {
        self.connection()
            .query_row(
                "SELECT tourid, name, country, price FROM tours WHERE tourid=?1",
                params![id],
                row_to_tour,
            )
            .optional()
            .map_err(|e| AgencyStoreError::query(e.to_string()))
    }

    pub fn get_all_tours(&self) -> Result<Vec<Tour>, AgencyStoreError> {
        let conn = self.connection();
        let mut stmt = conn
            .prepare_cached("SELECT tourid, name, country, price FROM tours ORDER BY tourid")
            .map_err(|e| AgencyStoreError::query(e.to_string()))?;
        let rows = stmt
            .query_map([], row_to_tour)
            .map_err(|e| AgencyStoreError::query(e.to_string()))?;
        let mut tours = Vec::new();
        for tour in rows {
            tours.push(tour.map_err(|e| AgencyStoreError::query(e.to_string()))?);
        }
        Ok(tours)
    }

    /// Delete a tour and, by cascade, every order that references it.
    ///
    /// Returns `Ok(false)` when no tour has the given id.
    pub fn delete_tour(&self, id: i64) -> Result<bool, AgencyStoreError> {
        self.write_tx("delete_tour", |conn| {
            let affected = conn
                .execute("DELETE FROM tours WHERE tourid=?1", params![id])
                .map_err(map_sqlite_err)?;
            Ok(affected > 0)
        })
    }
}
