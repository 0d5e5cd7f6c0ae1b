//! Filtered search operations with wall-clock timing.
//!
//! Each search runs a single grouped query and reports how long it took in
//! milliseconds alongside the rows. Substring filters are case-insensitive;
//! grouping on all selected columns suppresses duplicate result rows.

use std::time::Instant;

use chrono::NaiveDate;
use rusqlite::params;

use crate::errors::AgencyStoreError;

use super::{
    types::{
        row_to_client_order, row_to_order_window, row_to_tour_price, ClientOrderRow, Decimal,
        OrderWindowRow, SearchOutcome, TourPriceRow,
    },
    AgencyStore,
};

impl AgencyStore {
    /// Orders whose status equals `status` exactly, joined with clients
    /// whose name contains `name_pattern` (case-insensitive).
    pub fn search_clients_and_orders(
        &self,
        name_pattern: &str,
        status: &str,
    ) -> Result<SearchOutcome<ClientOrderRow>, AgencyStoreError> {
        let started = Instant::now();
        let rows = self.collect_rows(
            "SELECT c.name, c.email, o.orderid, o.status, o.orderdate \
             FROM clients c \
             JOIN orders o ON c.clientid = o.clientid \
             WHERE c.name LIKE '%' || ?1 || '%' AND o.status = ?2 \
             GROUP BY c.name, c.email, o.orderid, o.status, o.orderdate",
            params![name_pattern, status],
            row_to_client_order,
        )?;
        Ok(SearchOutcome {
            rows,
            elapsed_ms: started.elapsed().as_secs_f64() * 1000.0,
        })
    }

    /// Tours priced within `[min_price, max_price]` inclusive whose country
    /// contains `country_pattern` (case-insensitive).
    pub fn search_tours_with_price_range(
        &self,
        min_price: Decimal,
        max_price: Decimal,
        country_pattern: &str,
    ) -> Result<SearchOutcome<TourPriceRow>, AgencyStoreError> {
        let started = Instant::now();
        let rows = self.collect_rows(
            "SELECT t.name, t.country, t.price \
             FROM tours t \
             WHERE t.price BETWEEN ?1 AND ?2 AND t.country LIKE '%' || ?3 || '%' \
             GROUP BY t.name, t.country, t.price",
            params![min_price, max_price, country_pattern],
            row_to_tour_price,
        )?;
        Ok(SearchOutcome {
            rows,
            elapsed_ms: started.elapsed().as_secs_f64() * 1000.0,
        })
    }

    /// Orders dated within `[start_date, end_date]` whose people count lies
    /// within `[min_people, max_people]`, all bounds inclusive.
    pub fn search_orders_with_date_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        min_people: i64,
        max_people: i64,
    ) -> Result<SearchOutcome<OrderWindowRow>, AgencyStoreError> {
        let started = Instant::now();
        let rows = self.collect_rows(
            "SELECT o.orderid, c.name, t.name, o.orderdate, o.peoplecount \
             FROM orders o \
             JOIN clients c ON o.clientid = c.clientid \
             JOIN tours t ON o.tourid = t.tourid \
             WHERE o.orderdate BETWEEN ?1 AND ?2 AND o.peoplecount BETWEEN ?3 AND ?4 \
             GROUP BY o.orderid, c.name, t.name, o.orderdate, o.peoplecount",
            params![start_date, end_date, min_people, max_people],
            row_to_order_window,
        )?;
        Ok(SearchOutcome {
            rows,
            elapsed_ms: started.elapsed().as_secs_f64() * 1000.0,
        })
    }

    fn collect_rows<T, P, F>(
        &self,
        sql: &str,
        params: P,
        mapper: F,
    ) -> Result<Vec<T>, AgencyStoreError>
    where
        P: rusqlite::Params,
        F: FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<T>,
    {
        let conn = self.connection();
        let mut stmt = conn
            .prepare_cached(sql)
            .map_err(|e| AgencyStoreError::query(e.to_string()))?;
        let rows = stmt
            .query_map(params, mapper)
            .map_err(|e| AgencyStoreError::query(e.to_string()))?;
        let mut result = Vec::new();
        for item in rows {
            result.push(item.map_err(|e| AgencyStoreError::query(e.to_string()))?);
        }
        Ok(result)
    }
}
