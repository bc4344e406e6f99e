// tests/persistence_tests.rs
mod common; // Reference the common module

use common::*;

use std::fs;
use std::sync::Arc;

use carrinho::{CartStore, JsonFileStorage, MemoryStorage, StorageBackend, DEFAULT_STORAGE_KEY};

#[test]
fn test_round_trip_through_file_storage() {
  setup_tracing();
  let dir = tempfile::tempdir().unwrap();

  {
    let storage = Arc::new(JsonFileStorage::new(dir.path()));
    let store = CartStore::open(storage);
    store.add_item(jersey(2)).unwrap();
    store.add_item(party_ticket(1)).unwrap();
  } // Store dropped: the "page reload".

  let reopened = CartStore::open(Arc::new(JsonFileStorage::new(dir.path())));

  assert_eq!(reopened.items(), vec![jersey(2), party_ticket(1)]);
  assert_eq!(reopened.total_items(), 3);
  assert_eq!(reopened.total_price(), price("224.80"));
}

#[test]
fn test_persisted_layout_uses_camel_case_records() {
  setup_tracing();
  let dir = tempfile::tempdir().unwrap();
  let storage = Arc::new(JsonFileStorage::new(dir.path()));
  let store = CartStore::open(Arc::clone(&storage) as Arc<dyn StorageBackend>);

  store.add_item(jersey(1)).unwrap();
  store.add_item(party_ticket(1)).unwrap();

  let raw = storage.load(DEFAULT_STORAGE_KEY).unwrap().expect("cart entry must exist");
  let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
  let records = value.as_array().expect("persisted cart is an array");
  assert_eq!(records.len(), 2);

  let product = &records[0];
  assert_eq!(product["id"], "product-1-m-black");
  assert_eq!(product["kind"], "product");
  assert_eq!(product["quantity"], 1);
  // Prices persist as plain JSON numbers, and the product record carries no
  // event date at all.
  assert_eq!(product["unitPrice"].as_f64(), Some(89.9));
  assert!(product["imageRef"].is_string());
  assert!(product.get("eventOccursAt").is_none());

  let ticket = &records[1];
  assert_eq!(ticket["kind"], "ticket");
  assert_eq!(ticket["eventOccursAt"], "12/05 - 19h");
}

#[test]
fn test_removing_last_line_deletes_persisted_entry() {
  setup_tracing();
  let storage = Arc::new(MemoryStorage::new());
  let store = CartStore::open(Arc::clone(&storage) as Arc<dyn StorageBackend>);

  store.add_item(jersey(1)).unwrap();
  assert!(storage.load(DEFAULT_STORAGE_KEY).unwrap().is_some());

  store.remove_item("product-1-m-black").unwrap();

  // Deleted, not an empty array: "emptied" is indistinguishable from
  // "never used" on the next load.
  assert!(storage.load(DEFAULT_STORAGE_KEY).unwrap().is_none());
}

#[test]
fn test_update_to_zero_on_last_line_deletes_persisted_entry() {
  setup_tracing();
  let storage = Arc::new(MemoryStorage::new());
  let store = CartStore::open(Arc::clone(&storage) as Arc<dyn StorageBackend>);

  store.add_item(party_ticket(2)).unwrap();
  store.update_quantity("ticket-5", 0).unwrap();

  assert!(storage.load(DEFAULT_STORAGE_KEY).unwrap().is_none());
}

#[test]
fn test_clear_deletes_persisted_entry() {
  setup_tracing();
  let dir = tempfile::tempdir().unwrap();
  let storage = Arc::new(JsonFileStorage::new(dir.path()));
  let store = CartStore::open(Arc::clone(&storage) as Arc<dyn StorageBackend>);

  store.add_item(jersey(1)).unwrap();
  store.clear().unwrap();

  assert!(storage.load(DEFAULT_STORAGE_KEY).unwrap().is_none());
  assert!(!dir.path().join("cart.json").exists());
}

#[test]
fn test_unparsable_persisted_cart_fails_open_to_empty() {
  setup_tracing();
  let dir = tempfile::tempdir().unwrap();
  fs::write(dir.path().join("cart.json"), "{ definitely not a cart").unwrap();

  let store = CartStore::open(Arc::new(JsonFileStorage::new(dir.path())));

  assert!(store.is_empty());

  // The store stays usable, and the next mutation replaces the corrupt value.
  store.add_item(jersey(1)).unwrap();
  let reopened = CartStore::open(Arc::new(JsonFileStorage::new(dir.path())));
  assert_eq!(reopened.total_items(), 1);
}

#[test]
fn test_zero_quantity_lines_are_dropped_on_restore() {
  setup_tracing();
  let storage = Arc::new(MemoryStorage::new());
  let raw = serde_json::to_string(&vec![jersey(2), {
    let mut stale = party_ticket(1);
    stale.quantity = 0;
    stale
  }])
  .unwrap();
  storage.store(DEFAULT_STORAGE_KEY, &raw).unwrap();

  let store = CartStore::open(Arc::clone(&storage) as Arc<dyn StorageBackend>);

  assert_eq!(store.items(), vec![jersey(2)]);
}

#[test]
fn test_custom_storage_key() {
  setup_tracing();
  let storage = Arc::new(MemoryStorage::new());
  let store = CartStore::open_with_key(Arc::clone(&storage) as Arc<dyn StorageBackend>, "cart-staging");

  assert_eq!(store.storage_key(), "cart-staging");
  store.add_item(jersey(1)).unwrap();

  assert!(storage.load("cart-staging").unwrap().is_some());
  assert!(storage.load(DEFAULT_STORAGE_KEY).unwrap().is_none());
}

#[test]
fn test_concurrent_handles_are_last_writer_wins() {
  setup_tracing();
  let storage = Arc::new(MemoryStorage::new());

  // Two independently opened stores over the same backend, like two tabs.
  let tab_a = CartStore::open(Arc::clone(&storage) as Arc<dyn StorageBackend>);
  tab_a.add_item(jersey(1)).unwrap();

  let tab_b = CartStore::open(Arc::clone(&storage) as Arc<dyn StorageBackend>);
  tab_b.add_item(party_ticket(1)).unwrap();

  // Tab A never saw the ticket; its next write overwrites tab B's.
  tab_a.add_item(jersey(1)).unwrap();

  let reopened = CartStore::open(Arc::clone(&storage) as Arc<dyn StorageBackend>);
  assert_eq!(reopened.items(), vec![jersey(2)]);
}
