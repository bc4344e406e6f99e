// src/lib.rs

//! Carrinho: a client-local shopping cart state store.
//!
//! Carrinho maintains the cart of a storefront session (shop products and
//! event tickets) with features like:
//!  - Merge-by-id additions: adding an item whose id matches an existing
//!    line sums quantities instead of duplicating the line.
//!  - Derived totals (`total_items`, `total_price`) kept consistent with
//!    the stored lines after every mutation, with exact decimal arithmetic.
//!  - Persistence through a pluggable key-value backend (in-memory or
//!    file-backed), written after every mutation and deleted when the cart
//!    empties; unparsable persisted state fails open to an empty cart.
//!  - Observer-style change notification: subscribers receive a `CartEvent`
//!    after each committed mutation, before the mutating call returns.
//!  - A simulated checkout flow (fixed delay, always succeeds) standing in
//!    for a real payment integration.

// Declare modules according to the planned structure
pub mod checkout;
pub mod error;
pub mod event;
pub mod item;
pub mod storage;
pub mod store;

// --- Re-exports for the Public API ---

// Domain model
pub use crate::item::{ItemKind, LineItem};

// The store and its signals
pub use crate::event::{CartEvent, SubscriptionId};
pub use crate::store::{CartStore, DEFAULT_STORAGE_KEY};

// Persistence seam and bundled backends
pub use crate::storage::{JsonFileStorage, MemoryStorage, StorageBackend};

// Simulated checkout flow
pub use crate::checkout::{simulate_checkout, OrderConfirmation, CHECKOUT_PROCESSING_DELAY};

pub use crate::error::{CartError, CartResult};
