//! Order operations for AgencyStore.

use chrono::NaiveDate;
use rusqlite::params;

use crate::errors::{map_sqlite_err, AgencyStoreError};

use super::{
    types::{row_to_order, row_to_order_record, validate_order_input, Decimal, Order, OrderRecord},
    AgencyStore,
};

impl AgencyStore {
    /// Insert a new order and return its id.
    ///
    /// Both parents must exist: a `client_id` or `tour_id` that references
    /// no row surfaces as [`AgencyStoreError::ConstraintViolation`].
    pub fn create_order(
        &self,
        client_id: i64,
        tour_id: i64,
        order_date: NaiveDate,
        status: &str,
        people_count: i64,
        discount: Option<Decimal>,
    ) -> Result<i64, AgencyStoreError> {
        validate_order_input(status, people_count, discount)?;
        self.write_tx("create_order", |conn| {
            conn.execute(
                "INSERT INTO orders(clientid, tourid, orderdate, status, peoplecount, discount) \
                 VALUES(?1, ?2, ?3, ?4, ?5, ?6)",
                params![client_id, tour_id, order_date, status, people_count, discount],
            )
            .map_err(map_sqlite_err)?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Every order joined with its client's and tour's names.
    pub fn get_all_orders(&self) -> Result<Vec<OrderRecord>, AgencyStoreError> {
        let conn = self.connection();
        let mut stmt = conn
            .prepare_cached(
                "SELECT o.orderid, c.name, t.name, o.orderdate, o.status, o.peoplecount, o.discount \
                 FROM orders o \
                 JOIN clients c ON o.clientid = c.clientid \
                 JOIN tours t ON o.tourid = t.tourid \
                 ORDER BY o.orderid",
            )
            .map_err(|e| AgencyStoreError::query(e.to_string()))?;
        let rows = stmt
            .query_map([], row_to_order_record)
            .map_err(|e| AgencyStoreError::query(e.to_string()))?;
        let mut orders = Vec::new();
        for order in rows {
            orders.push(order.map_err(|e| AgencyStoreError::query(e.to_string()))?);
        }
        Ok(orders)
    }

    /// Orders with their raw foreign keys, for dump/load.
    pub(crate) fn all_orders_raw(&self) -> Result<Vec<Order>, AgencyStoreError> {
        let conn = self.connection();
        let mut stmt = conn
            .prepare_cached(
                "SELECT orderid, clientid, tourid, orderdate, status, peoplecount, discount \
                 FROM orders ORDER BY orderid",
            )
            .map_err(|e| AgencyStoreError::query(e.to_string()))?;
        let rows = stmt
            .query_map([], row_to_order)
            .map_err(|e| AgencyStoreError::query(e.to_string()))?;
        let mut orders = Vec::new();
        for order in rows {
            orders.push(order.map_err(|e| AgencyStoreError::query(e.to_string()))?);
        }
        Ok(orders)
    }
}
