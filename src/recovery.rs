//! Store backup and restore as newline-delimited JSON.
//!
//! One record per line, parents before orders, so a dump file always loads
//! without tripping the foreign-key constraints.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    errors::AgencyStoreError,
    store::{AgencyStore, Decimal},
};

#[derive(Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum DumpRecord {
    Client {
        id: i64,
        name: String,
        email: String,
        phone: Option<String>,
    },
    Tour {
        id: i64,
        name: String,
        country: String,
        price: Decimal,
    },
    Order {
        id: i64,
        client_id: i64,
        tour_id: i64,
        order_date: NaiveDate,
        status: String,
        people_count: i64,
        discount: Option<Decimal>,
    },
}

pub fn dump_store_to_path<P: AsRef<Path>>(
    store: &AgencyStore,
    path: P,
) -> Result<(), AgencyStoreError> {
    let file =
        File::create(path.as_ref()).map_err(|e| AgencyStoreError::invalid_input(e.to_string()))?;
    dump_store_to_writer(store, BufWriter::new(file))
}

pub fn dump_store_to_writer<W: Write>(
    store: &AgencyStore,
    mut writer: W,
) -> Result<(), AgencyStoreError> {
    for client in store.get_all_clients()? {
        write_record(
            &mut writer,
            &DumpRecord::Client {
                id: client.id,
                name: client.name,
                email: client.email,
                phone: client.phone,
            },
        )?;
    }
    for tour in store.get_all_tours()? {
        write_record(
            &mut writer,
            &DumpRecord::Tour {
                id: tour.id,
                name: tour.name,
                country: tour.country,
                price: tour.price,
            },
        )?;
    }
    for order in store.all_orders_raw()? {
        write_record(
            &mut writer,
            &DumpRecord::Order {
                id: order.id,
                client_id: order.client_id,
                tour_id: order.tour_id,
                order_date: order.order_date,
                status: order.status,
                people_count: order.people_count,
                discount: order.discount,
            },
        )?;
    }
    Ok(())
}

pub fn load_store_from_path<P: AsRef<Path>>(
    store: &AgencyStore,
    path: P,
) -> Result<(), AgencyStoreError> {
    let file =
        File::open(path.as_ref()).map_err(|e| AgencyStoreError::invalid_input(e.to_string()))?;
    load_store_from_reader(store, BufReader::new(file))
}

/// Replace the store contents with the records in `reader`.
///
/// Runs as one unit-of-work: either every record loads or the store is left
/// untouched.
pub fn load_store_from_reader<R: BufRead>(
    store: &AgencyStore,
    reader: R,
) -> Result<(), AgencyStoreError> {
    let conn = store.connection();
    conn.execute("BEGIN IMMEDIATE", [])
        .map_err(|e| AgencyStoreError::query(e.to_string()))?;
    let result: Result<(), AgencyStoreError> = (|| {
        conn.execute("DELETE FROM orders", [])
            .map_err(|e| AgencyStoreError::query(e.to_string()))?;
        conn.execute("DELETE FROM tours", [])
            .map_err(|e| AgencyStoreError::query(e.to_string()))?;
        conn.execute("DELETE FROM clients", [])
            .map_err(|e| AgencyStoreError::query(e.to_string()))?;

        let mut stmt_client = conn
            .prepare_cached("INSERT INTO clients(clientid,name,email,phone) VALUES(?1,?2,?3,?4)")
            .map_err(|e| AgencyStoreError::query(e.to_string()))?;
        let mut stmt_tour = conn
            .prepare_cached("INSERT INTO tours(tourid,name,country,price) VALUES(?1,?2,?3,?4)")
            .map_err(|e| AgencyStoreError::query(e.to_string()))?;
        let mut stmt_order = conn
            .prepare_cached(
                "INSERT INTO orders(orderid,clientid,tourid,orderdate,status,peoplecount,discount) \
                 VALUES(?1,?2,?3,?4,?5,?6,?7)",
            )
            .map_err(|e| AgencyStoreError::query(e.to_string()))?;

        let mut loaded = 0usize;
        for line in reader.lines() {
            let line = line.map_err(|e| AgencyStoreError::invalid_input(e.to_string()))?;
            if line.trim().is_empty() {
                continue;
            }
            let record: DumpRecord = serde_json::from_str(&line)
                .map_err(|e| AgencyStoreError::invalid_input(e.to_string()))?;
            match record {
                DumpRecord::Client {
                    id,
                    name,
                    email,
                    phone,
                } => {
                    stmt_client
                        .execute(rusqlite::params![id, name, email, phone])
                        .map_err(|e| AgencyStoreError::query(e.to_string()))?;
                }
                DumpRecord::Tour {
                    id,
                    name,
                    country,
                    price,
                } => {
                    stmt_tour
                        .execute(rusqlite::params![id, name, country, price])
                        .map_err(|e| AgencyStoreError::query(e.to_string()))?;
                }
                DumpRecord::Order {
                    id,
                    client_id,
                    tour_id,
                    order_date,
                    status,
                    people_count,
                    discount,
                } => {
                    stmt_order
                        .execute(rusqlite::params![
                            id,
                            client_id,
                            tour_id,
                            order_date,
                            status,
                            people_count,
                            discount
                        ])
                        .map_err(|e| AgencyStoreError::query(e.to_string()))?;
                }
            }
            loaded += 1;
        }
        debug!(records = loaded, "store loaded from dump");
        Ok(())
    })();
    match result {
        Ok(()) => conn
            .execute("COMMIT", [])
            .map_err(|e| AgencyStoreError::query(e.to_string()))
            .map(|_| ()),
        Err(err) => {
            let _ = conn.execute("ROLLBACK", []);
            Err(err)
        }
    }
}

fn write_record<W: Write>(writer: &mut W, record: &DumpRecord) -> Result<(), AgencyStoreError> {
    let line = serde_json::to_string(record)
        .map_err(|e| AgencyStoreError::invalid_input(e.to_string()))?;
    writeln!(writer, "{line}").map_err(|e| AgencyStoreError::invalid_input(e.to_string()))
}
