use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::types::{FromSql, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::ToSql;
use serde::{Deserialize, Serialize};

use crate::errors::AgencyStoreError;

/// Fixed-point value with two fractional digits, stored as hundredths.
///
/// Used for tour prices and order discounts so monetary values never touch
/// binary floating point, in storage or in range comparisons.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decimal(i64);

impl Decimal {
    pub const ZERO: Decimal = Decimal(0);

    pub fn from_hundredths(hundredths: i64) -> Self {
        Decimal(hundredths)
    }

    pub fn hundredths(self) -> i64 {
        self.0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl FromStr for Decimal {
    type Err = AgencyStoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (sign, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (-1i64, rest),
            None => (1i64, trimmed),
        };
        let (whole, frac) = match digits.split_once('.') {
            Some((w, f)) => (w, f),
            None => (digits, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(AgencyStoreError::invalid_input(format!(
                "invalid decimal literal: {s:?}"
            )));
        }
        if frac.len() > 2 {
            return Err(AgencyStoreError::invalid_input(format!(
                "decimal literal has more than two fractional digits: {s:?}"
            )));
        }
        let whole_value: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| {
                AgencyStoreError::invalid_input(format!("invalid decimal literal: {s:?}"))
            })?
        };
        let mut frac_value: i64 = if frac.is_empty() {
            0
        } else {
            frac.parse().map_err(|_| {
                AgencyStoreError::invalid_input(format!("invalid decimal literal: {s:?}"))
            })?
        };
        if frac.len() == 1 {
            frac_value *= 10;
        }
        Ok(Decimal(sign * (whole_value * 100 + frac_value)))
    }
}

impl ToSql for Decimal {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0))
    }
}

impl FromSql for Decimal {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(Decimal)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tour {
    pub id: i64,
    pub name: String,
    pub country: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: i64,
    pub client_id: i64,
    pub tour_id: i64,
    pub order_date: NaiveDate,
    pub status: String,
    pub people_count: i64,
    pub discount: Option<Decimal>,
}

/// Order row joined with its client and tour names, as produced by
/// [`AgencyStore::get_all_orders`](crate::AgencyStore::get_all_orders).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderRecord {
    pub id: i64,
    pub client_name: String,
    pub tour_name: String,
    pub order_date: NaiveDate,
    pub status: String,
    pub people_count: i64,
    pub discount: Option<Decimal>,
}

/// Result row of `search_clients_and_orders`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientOrderRow {
    pub client_name: String,
    pub email: String,
    pub order_id: i64,
    pub status: String,
    pub order_date: NaiveDate,
}

/// Result row of `search_tours_with_price_range`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TourPriceRow {
    pub name: String,
    pub country: String,
    pub price: Decimal,
}

/// Result row of `search_orders_with_date_range`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderWindowRow {
    pub order_id: i64,
    pub client_name: String,
    pub tour_name: String,
    pub order_date: NaiveDate,
    pub people_count: i64,
}

/// Rows of a filtered search plus the wall-clock time the query took.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome<T> {
    pub rows: Vec<T>,
    pub elapsed_ms: f64,
}

pub fn validate_client_input(name: &str, email: &str) -> Result<(), AgencyStoreError> {
    if name.trim().is_empty() {
        return Err(AgencyStoreError::invalid_input("client name must be set"));
    }
    if email.trim().is_empty() {
        return Err(AgencyStoreError::invalid_input("client email must be set"));
    }
    Ok(())
}

pub fn validate_tour_input(name: &str, country: &str, price: Decimal) -> Result<(), AgencyStoreError> {
    if name.trim().is_empty() {
        return Err(AgencyStoreError::invalid_input("tour name must be set"));
    }
    if country.trim().is_empty() {
        return Err(AgencyStoreError::invalid_input("tour country must be set"));
    }
    if price.is_negative() {
        return Err(AgencyStoreError::invalid_input(
            "tour price must not be negative",
        ));
    }
    Ok(())
}

pub fn validate_order_input(
    status: &str,
    people_count: i64,
    discount: Option<Decimal>,
) -> Result<(), AgencyStoreError> {
    if status.trim().is_empty() {
        return Err(AgencyStoreError::invalid_input("order status must be set"));
    }
    if people_count < 1 {
        return Err(AgencyStoreError::invalid_input(
            "order people count must be positive",
        ));
    }
    if let Some(discount) = discount {
        if discount.is_negative() {
            return Err(AgencyStoreError::invalid_input(
                "order discount must not be negative",
            ));
        }
    }
    Ok(())
}

pub fn row_to_client(row: &rusqlite::Row<'_>) -> Result<Client, rusqlite::Error> {
    Ok(Client {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
    })
}

pub fn row_to_tour(row: &rusqlite::Row<'_>) -> Result<Tour, rusqlite::Error> {
    Ok(Tour {
        id: row.get(0)?,
        name: row.get(1)?,
        country: row.get(2)?,
        price: row.get(3)?,
    })
}

pub fn row_to_order(row: &rusqlite::Row<'_>) -> Result<Order, rusqlite::Error> {
    Ok(Order {
        id: row.get(0)?,
        client_id: row.get(1)?,
        tour_id: row.get(2)?,
        order_date: row.get(3)?,
        status: row.get(4)?,
        people_count: row.get(5)?,
        discount: row.get(6)?,
    })
}

pub fn row_to_order_record(row: &rusqlite::Row<'_>) -> Result<OrderRecord, rusqlite::Error> {
    Ok(OrderRecord {
        id: row.get(0)?,
        client_name: row.get(1)?,
        tour_name: row.get(2)?,
        order_date: row.get(3)?,
        status: row.get(4)?,
        people_count: row.get(5)?,
        discount: row.get(6)?,
    })
}

pub fn row_to_client_order(row: &rusqlite::Row<'_>) -> Result<ClientOrderRow, rusqlite::Error> {
    Ok(ClientOrderRow {
        client_name: row.get(0)?,
        email: row.get(1)?,
        order_id: row.get(2)?,
        status: row.get(3)?,
        order_date: row.get(4)?,
    })
}

pub fn row_to_tour_price(row: &rusqlite::Row<'_>) -> Result<TourPriceRow, rusqlite::Error> {
    Ok(TourPriceRow {
        name: row.get(0)?,
        country: row.get(1)?,
        price: row.get(2)?,
    })
}

pub fn row_to_order_window(row: &rusqlite::Row<'_>) -> Result<OrderWindowRow, rusqlite::Error> {
    Ok(OrderWindowRow {
        order_id: row.get(0)?,
        client_name: row.get(1)?,
        tour_name: row.get(2)?,
        order_date: row.get(3)?,
        people_count: row.get(4)?,
    })
}
