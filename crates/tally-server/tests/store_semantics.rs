#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use tally_core::record::{CounterRecord, PARTITION_KEY, ROW_KEY};
use tally_server::store::{self, FileStore, Lookup, MemoryStore, TableStore};

fn record(count: u64) -> CounterRecord {
    CounterRecord {
        partition_key: PARTITION_KEY.to_string(),
        row_key: ROW_KEY.to_string(),
        count,
    }
}

#[tokio::test]
async fn get_on_empty_table_is_not_found() {
    let store = MemoryStore::new("counter");
    let looked_up = store.get_entity(PARTITION_KEY, ROW_KEY).await.unwrap();
    assert_eq!(looked_up, Lookup::NotFound);
}

#[tokio::test]
async fn create_then_get_round_trips() {
    let store = MemoryStore::new("counter");
    store.create_entity(&record(1)).await.unwrap();
    let looked_up = store.get_entity(PARTITION_KEY, ROW_KEY).await.unwrap();
    assert_eq!(looked_up, Lookup::Found(record(1)));
}

#[tokio::test]
async fn create_twice_is_an_error() {
    let store = MemoryStore::new("counter");
    store.create_entity(&record(1)).await.unwrap();
    let err = store.create_entity(&record(1)).await.unwrap_err();
    assert!(err.to_string().contains("already exists"));
}

#[tokio::test]
async fn update_of_missing_row_is_an_error() {
    let store = MemoryStore::new("counter");
    let err = store.update_entity(&record(2)).await.unwrap_err();
    assert!(err.to_string().contains("missing row"));
}

#[tokio::test]
async fn replace_write_loses_concurrent_update() {
    // Two handlers both read count=5 and both write count=6. The replace is
    // unconditional, so the second write silently overwrites the first and
    // one visit is lost. This is the specified update mode.
    let store = MemoryStore::new("counter");
    store.create_entity(&record(5)).await.unwrap();

    let first = store.get_entity(PARTITION_KEY, ROW_KEY).await.unwrap();
    let second = store.get_entity(PARTITION_KEY, ROW_KEY).await.unwrap();
    let (Lookup::Found(mut a), Lookup::Found(mut b)) = (first, second) else {
        panic!("row must exist");
    };
    a.increment();
    b.increment();
    store.update_entity(&a).await.unwrap();
    store.update_entity(&b).await.unwrap();

    let final_row = store.get_entity(PARTITION_KEY, ROW_KEY).await.unwrap();
    assert_eq!(final_row, Lookup::Found(record(6)));
}

#[tokio::test]
async fn open_store_recognizes_schemes() {
    store::open_store("memory:", "counter").unwrap();
    store::open_store("file:/tmp/tally-test-open.json", "counter").unwrap();
    let err = store::open_store("cosmos://whatever", "counter").unwrap_err();
    assert!(err.to_string().contains("unrecognized connection string scheme"));
    let err = store::open_store("file:", "counter").unwrap_err();
    assert!(err.to_string().contains("needs a path"));
}

fn temp_store_path(tag: &str) -> std::path::PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("tally-store-{tag}-{}.json", std::process::id()));
    p
}

#[tokio::test]
async fn file_store_persists_across_reopen() {
    let path = temp_store_path("reopen");
    let _ = std::fs::remove_file(&path);

    {
        let store = FileStore::new(&path, "counter");
        store.create_entity(&record(1)).await.unwrap();
        let mut rec = record(1);
        rec.increment();
        store.update_entity(&rec).await.unwrap();
    }

    let reopened = FileStore::new(&path, "counter");
    let looked_up = reopened.get_entity(PARTITION_KEY, ROW_KEY).await.unwrap();
    assert_eq!(looked_up, Lookup::Found(record(2)));

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn file_store_tables_are_isolated() {
    let path = temp_store_path("tables");
    let _ = std::fs::remove_file(&path);

    let counters = FileStore::new(&path, "counter");
    let other = FileStore::new(&path, "other");
    counters.create_entity(&record(7)).await.unwrap();

    let looked_up = other.get_entity(PARTITION_KEY, ROW_KEY).await.unwrap();
    assert_eq!(looked_up, Lookup::NotFound);

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn file_store_rejects_corrupt_document() {
    let path = temp_store_path("corrupt");
    std::fs::write(&path, "not json").unwrap();

    let store = FileStore::new(&path, "counter");
    let err = store.get_entity(PARTITION_KEY, ROW_KEY).await.unwrap_err();
    assert!(err.to_string().contains("corrupt store file"));

    let _ = std::fs::remove_file(&path);
}
