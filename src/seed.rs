//! Demo/test seeding for the agency store.
//!
//! Not part of the production contract. Inserts a fixed number of random
//! clients, tours, and orders through the regular store operations, so every
//! seeded row passes the same validation and constraints as real data.

use chrono::{Duration, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

use crate::{
    errors::AgencyStoreError,
    store::{AgencyStore, Decimal},
};

pub const SEED_COUNTRIES: [&str; 5] = ["USA", "France", "Italy", "Japan", "Brazil"];
pub const SEED_STATUSES: [&str; 3] = ["Pending", "Confirmed", "Cancelled"];

const SEED_ROWS: usize = 10;

/// How many rows of each kind a seeding run actually inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub clients: usize,
    pub tours: usize,
    pub orders: usize,
}

/// Seed 10 random clients, 10 random tours, and 10 random orders.
pub fn generate_random_data(store: &AgencyStore) -> Result<SeedReport, AgencyStoreError> {
    seed_with_rng(store, &mut StdRng::from_entropy())
}

/// Deterministic variant of [`generate_random_data`] for tests and benches.
pub fn generate_random_data_seeded(
    store: &AgencyStore,
    seed: u64,
) -> Result<SeedReport, AgencyStoreError> {
    seed_with_rng(store, &mut StdRng::seed_from_u64(seed))
}

fn seed_with_rng(store: &AgencyStore, rng: &mut StdRng) -> Result<SeedReport, AgencyStoreError> {
    let mut report = SeedReport::default();

    for idx in 0..SEED_ROWS {
        let n: u32 = rng.gen_range(0..1000);
        let name = format!("Client_{n}");
        // The row index keeps one run's emails unique among themselves; a
        // collision with pre-existing data is skipped, not fatal.
        let email = format!("client_{n}_{idx}@example.com");
        let phone = format!("+1-{}-{:04}", rng.gen_range(100..1000), rng.gen_range(0..10_000));
        match store.add_client(&name, &email, Some(&phone)) {
            Ok(_) => report.clients += 1,
            Err(AgencyStoreError::ConstraintViolation(reason)) => {
                debug!(%reason, "seed client skipped");
            }
            Err(err) => return Err(err),
        }
    }

    for _ in 0..SEED_ROWS {
        let name = format!("Tour_{}", rng.gen_range(0..100));
        let country = SEED_COUNTRIES[rng.gen_range(0..SEED_COUNTRIES.len())];
        let price = Decimal::from_hundredths(rng.gen_range(10_000..=110_000));
        store.add_tour(&name, country, price)?;
        report.tours += 1;
    }

    let clients = store.get_all_clients()?;
    let tours = store.get_all_tours()?;
    if clients.is_empty() || tours.is_empty() {
        return Ok(report);
    }

    let today = Utc::now().date_naive();
    for _ in 0..SEED_ROWS {
        let client = &clients[rng.gen_range(0..clients.len())];
        let tour = &tours[rng.gen_range(0..tours.len())];
        let order_date = today - Duration::days(rng.gen_range(0..30));
        let status = SEED_STATUSES[rng.gen_range(0..SEED_STATUSES.len())];
        let people_count = rng.gen_range(1..=10);
        let discount = Decimal::from_hundredths(rng.gen_range(0..=5_000));
        store.create_order(
            client.id,
            tour.id,
            order_date,
            status,
            people_count,
            Some(discount),
        )?;
        report.orders += 1;
    }

    debug!(
        clients = report.clients,
        tours = report.tours,
        orders = report.orders,
        "random data generated"
    );
    Ok(report)
}
