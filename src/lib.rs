//! Embedded SQLite-backed data store for a tourist agency.
//!
//! agencydb maintains clients, tours, and orders in a relational store and
//! exposes synchronous create/read/update/delete and filtered-search
//! operations. Every operation maps one method call onto one parameterized
//! SQL statement; there is no caching and no background work.
//!
//! # Features
//!
//! - **Idempotent schema setup**: create-if-not-exists tables with a
//!   versioned meta row and forward-only migrations
//! - **Cascade integrity**: deleting a client or tour removes its orders
//!   through enforced foreign keys
//! - **Explicit results**: every mutation reports success or failure to the
//!   caller instead of swallowing errors
//! - **Timed searches**: each filtered search returns its wall-clock
//!   execution time in milliseconds alongside the rows
//! - **Instrumentation**: per-connection statement and transaction counters
//! - **Demo seeding** and NDJSON **dump/load** utilities
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use agencydb::{AgencyStore, Decimal};
//!
//! let store = AgencyStore::open("agency.db")?;
//! let client = store.add_client("Alice Smith", "alice@example.com", None)?;
//! let tour = store.add_tour("Tour_5", "France", "150.00".parse()?)?;
//!
//! let date = chrono::NaiveDate::from_ymd_opt(2025, 7, 14).unwrap();
//! store.create_order(client, tour, date, "Confirmed", 2, None)?;
//!
//! let found = store.search_tours_with_price_range(
//!     Decimal::from_hundredths(10_000),
//!     Decimal::from_hundredths(20_000),
//!     "Fra",
//! )?;
//! println!("{} tours in {:.2} ms", found.rows.len(), found.elapsed_ms);
//! # Ok::<(), agencydb::AgencyStoreError>(())
//! ```

pub mod config;
pub mod errors;
pub mod recovery;
pub mod schema;
pub mod seed;
pub mod store;

pub use config::{open_store, JournalMode, StoreConfig};
pub use errors::AgencyStoreError;
pub use recovery::{
    dump_store_to_path, dump_store_to_writer, load_store_from_path, load_store_from_reader,
};
pub use seed::{
    generate_random_data, generate_random_data_seeded, SeedReport, SEED_COUNTRIES, SEED_STATUSES,
};
pub use store::{
    AgencyStore, Client, ClientOrderRow, Decimal, Order, OrderRecord, OrderWindowRow,
    SearchOutcome, StoreMetricsSnapshot, Tour, TourPriceRow,
};
