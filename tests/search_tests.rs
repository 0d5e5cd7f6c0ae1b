use agencydb::{AgencyStore, Decimal};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn dec(s: &str) -> Decimal {
    s.parse().expect("decimal")
}

fn seeded_store() -> AgencyStore {
    let store = AgencyStore::open_in_memory().expect("store");
    let alice = store
        .add_client("Alice Smith", "alice@example.com", None)
        .expect("alice");
    let bob = store
        .add_client("Bob Jones", "bob@example.com", None)
        .expect("bob");
    let france = store
        .add_tour("Tour_5", "France", dec("150.00"))
        .expect("france tour");
    let japan = store
        .add_tour("Tour_9", "Japan", dec("150.00"))
        .expect("japan tour");
    store
        .add_tour("Tour_7", "France", dec("500.00"))
        .expect("expensive tour");
    store
        .create_order(alice, france, date(2025, 7, 10), "Confirmed", 2, None)
        .expect("alice confirmed");
    store
        .create_order(alice, japan, date(2025, 7, 15), "Pending", 5, None)
        .expect("alice pending");
    store
        .create_order(bob, france, date(2025, 7, 20), "Confirmed", 8, None)
        .expect("bob confirmed");
    store
}

#[test]
fn test_price_range_and_country_pattern() {
    let store = seeded_store();
    let outcome = store
        .search_tours_with_price_range(dec("100.00"), dec("200.00"), "Fra")
        .expect("search");
    assert_eq!(outcome.rows.len(), 1);
    assert_eq!(outcome.rows[0].name, "Tour_5");
    assert_eq!(outcome.rows[0].country, "France");
    assert_eq!(outcome.rows[0].price, dec("150.00"));
}

#[test]
fn test_price_range_bounds_are_inclusive() {
    let store = seeded_store();
    let outcome = store
        .search_tours_with_price_range(dec("150.00"), dec("150.00"), "")
        .expect("search");
    // Tour_5 (France) and Tour_9 (Japan) both sit exactly on the bound.
    assert_eq!(outcome.rows.len(), 2);
}

#[test]
fn test_country_pattern_is_case_insensitive() {
    let store = seeded_store();
    let outcome = store
        .search_tours_with_price_range(dec("0.00"), dec("1000.00"), "fra")
        .expect("search");
    assert_eq!(outcome.rows.len(), 2);
    assert!(outcome.rows.iter().all(|row| row.country == "France"));
}

#[test]
fn test_clients_and_orders_name_and_status_filters() {
    let store = seeded_store();
    let outcome = store
        .search_clients_and_orders("ali", "Confirmed")
        .expect("search");
    assert_eq!(outcome.rows.len(), 1);
    let row = &outcome.rows[0];
    assert_eq!(row.client_name, "Alice Smith");
    assert_eq!(row.email, "alice@example.com");
    assert_eq!(row.status, "Confirmed");
    assert_eq!(row.order_date, date(2025, 7, 10));
}

#[test]
fn test_clients_and_orders_status_is_exact() {
    let store = seeded_store();
    let outcome = store
        .search_clients_and_orders("ali", "confirmed")
        .expect("search");
    assert!(outcome.rows.is_empty());
}

#[test]
fn test_clients_and_orders_uppercase_pattern_matches() {
    let store = seeded_store();
    let outcome = store
        .search_clients_and_orders("ALI", "Pending")
        .expect("search");
    assert_eq!(outcome.rows.len(), 1);
    assert_eq!(outcome.rows[0].client_name, "Alice Smith");
}

#[test]
fn test_date_range_bounds_are_inclusive() {
    let store = seeded_store();
    let outcome = store
        .search_orders_with_date_range(date(2025, 7, 10), date(2025, 7, 20), 1, 10)
        .expect("search");
    assert_eq!(outcome.rows.len(), 3);

    let narrowed = store
        .search_orders_with_date_range(date(2025, 7, 11), date(2025, 7, 19), 1, 10)
        .expect("search");
    assert_eq!(narrowed.rows.len(), 1);
    assert_eq!(narrowed.rows[0].order_date, date(2025, 7, 15));
}

#[test]
fn test_people_count_bounds_are_inclusive() {
    let store = seeded_store();
    let outcome = store
        .search_orders_with_date_range(date(2025, 1, 1), date(2025, 12, 31), 2, 5)
        .expect("search");
    assert_eq!(outcome.rows.len(), 2);
    assert!(outcome
        .rows
        .iter()
        .all(|row| (2..=5).contains(&row.people_count)));
}

#[test]
fn test_identical_tour_rows_are_deduplicated() {
    let store = AgencyStore::open_in_memory().expect("store");
    store
        .add_tour("Tour_5", "France", dec("150.00"))
        .expect("first copy");
    store
        .add_tour("Tour_5", "France", dec("150.00"))
        .expect("second copy");
    let outcome = store
        .search_tours_with_price_range(dec("100.00"), dec("200.00"), "France")
        .expect("search");
    assert_eq!(outcome.rows.len(), 1);
}

#[test]
fn test_search_elapsed_time_is_nonnegative() {
    let store = seeded_store();
    let clients = store
        .search_clients_and_orders("a", "Confirmed")
        .expect("clients search");
    let tours = store
        .search_tours_with_price_range(dec("0.00"), dec("1000.00"), "")
        .expect("tours search");
    let orders = store
        .search_orders_with_date_range(date(2025, 1, 1), date(2025, 12, 31), 1, 10)
        .expect("orders search");
    assert!(clients.elapsed_ms >= 0.0);
    assert!(tours.elapsed_ms >= 0.0);
    assert!(orders.elapsed_ms >= 0.0);
}
