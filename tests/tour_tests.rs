use agencydb::{AgencyStore, AgencyStoreError, Decimal};

#[test]
fn test_add_tour_appears_in_listing() {
    let store = AgencyStore::open_in_memory().expect("store");
    let id = store
        .add_tour("Tour_5", "France", Decimal::from_hundredths(15_000))
        .expect("insert");
    let tours = store.get_all_tours().expect("list");
    assert!(tours.iter().any(|t| {
        t.id == id
            && t.name == "Tour_5"
            && t.country == "France"
            && t.price == Decimal::from_hundredths(15_000)
    }));
}

#[test]
fn test_get_tour_roundtrips_price() {
    let store = AgencyStore::open_in_memory().expect("store");
    let price: Decimal = "499.99".parse().expect("decimal");
    let id = store.add_tour("Tour_7", "Japan", price).expect("insert");
    let stored = store.get_tour(id).expect("get").expect("present");
    assert_eq!(stored.price, price);
    assert_eq!(stored.price.to_string(), "499.99");
}

#[test]
fn test_add_tour_rejects_negative_price() {
    let store = AgencyStore::open_in_memory().expect("store");
    let err = store
        .add_tour("Tour_1", "Italy", Decimal::from_hundredths(-100))
        .expect_err("negative price");
    match err {
        AgencyStoreError::InvalidInput(_) => {}
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_delete_missing_tour_is_noop() {
    let store = AgencyStore::open_in_memory().expect("store");
    assert!(!store.delete_tour(42).expect("delete"));
}
