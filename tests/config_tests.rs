use agencydb::{open_store, AgencyStore, AgencyStoreError, JournalMode, StoreConfig};

#[test]
fn test_open_store_defaults_create_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("agency.db");
    let store = open_store(&path, &StoreConfig::default()).expect("open");
    store
        .add_client("Alice Smith", "alice@example.com", None)
        .expect("insert");
    drop(store);
    assert!(path.exists());

    let reopened = AgencyStore::open(&path).expect("reopen");
    assert_eq!(reopened.get_all_clients().expect("clients").len(), 1);
}

#[test]
fn test_open_store_without_create_fails_on_missing_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("missing.db");
    let cfg = StoreConfig {
        create_if_missing: false,
        ..StoreConfig::default()
    };
    let err = open_store(&path, &cfg).expect_err("missing file");
    match err {
        AgencyStoreError::ConnectionError(_) => {}
        other => panic!("expected ConnectionError, got {other:?}"),
    }
}

#[test]
fn test_open_store_with_delete_journal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("agency.db");
    let cfg = StoreConfig {
        journal: JournalMode::Delete,
        ..StoreConfig::default()
    };
    let store = open_store(&path, &cfg).expect("open");
    assert_eq!(
        store.schema_version().expect("version"),
        agencydb::schema::SCHEMA_VERSION
    );
}

#[test]
fn test_reopen_preserves_rows_across_connections() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("agency.db");
    {
        let store = AgencyStore::open(&path).expect("open");
        store
            .add_client("Bob Jones", "bob@example.com", None)
            .expect("insert");
    }
    let store = AgencyStore::open(&path).expect("reopen");
    let clients = store.get_all_clients().expect("clients");
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].email, "bob@example.com");
}
