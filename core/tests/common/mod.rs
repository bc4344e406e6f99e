// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use std::sync::{Arc, Mutex};

use carrinho::{CartEvent, CartStore, LineItem};
use rust_decimal::Decimal;
use tracing::Level;

// --- Fixtures ---
// Mirror the storefront's id scheme: `product-<id>-<size>-<color>` for shop
// products, `ticket-<eventId>` for event tickets.

pub fn jersey(quantity: u32) -> LineItem {
  LineItem::product(
    "product-1-m-black",
    "Camisa Oficial (M, Preta)",
    price("89.90"),
    quantity,
    "/images/products/camisa-oficial.jpg",
  )
}

pub fn party_ticket(quantity: u32) -> LineItem {
  LineItem::ticket(
    "ticket-5",
    "Festa de Integração",
    price("45.00"),
    quantity,
    "/images/events/festa-integracao.jpg",
    "12/05 - 19h",
  )
}

pub fn price(value: &str) -> Decimal {
  value.parse().expect("test price literal must parse")
}

// --- Recording subscriber ---
// Captures every event the store delivers, in order.

pub fn attach_recorder(store: &CartStore) -> Arc<Mutex<Vec<CartEvent>>> {
  let events = Arc::new(Mutex::new(Vec::new()));
  let sink = Arc::clone(&events);
  store.subscribe(move |event| {
    sink.lock().expect("recorder mutex poisoned").push(event.clone());
  });
  events
}

pub fn recorded(events: &Arc<Mutex<Vec<CartEvent>>>) -> Vec<CartEvent> {
  events.lock().expect("recorder mutex poisoned").clone()
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
