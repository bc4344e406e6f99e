// core/src/store.rs

//! The cart store: owns the ordered list of line items, keeps derived totals
//! consistent, persists after every mutation, and notifies subscribers.
//!
//! The store is an explicit, injectable object. Cloning a `CartStore` clones
//! a handle to the same underlying cart (shared ownership via `Arc`), so a
//! header badge and a cart page can hold their own handles to one cart.
//!
//! Locking discipline: internal guards are never held while subscriber
//! callbacks run, so a callback may read the store re-entrantly.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::error::{CartError, CartResult};
use crate::event::{CartEvent, SubscriptionId};
use crate::item::LineItem;
use crate::storage::{MemoryStorage, StorageBackend};

/// Storage key the cart is persisted under unless overridden.
pub const DEFAULT_STORAGE_KEY: &str = "cart";

type Subscriber = Arc<dyn Fn(&CartEvent) + Send + Sync + 'static>;

struct StoreInner {
  key: String,
  storage: Arc<dyn StorageBackend>,
  lines: RwLock<Vec<LineItem>>,
  subscribers: Mutex<Vec<(SubscriptionId, Subscriber)>>,
  next_subscription: AtomicU64,
}

/// Shared handle to a cart.
///
/// Invariants maintained across all operations:
/// - `id` values are unique; an add whose `id` matches an existing line merges
///   into it by summing quantity (all other fields of the existing line are
///   left untouched).
/// - Every stored line has `quantity >= 1`; any operation that would leave a
///   line at 0 removes the line instead.
/// - The persisted entry always reflects the current lines, and is deleted
///   (not written as an empty array) when the cart empties.
#[derive(Clone)]
pub struct CartStore {
  inner: Arc<StoreInner>,
}

impl CartStore {
  /// Opens a cart persisted under [`DEFAULT_STORAGE_KEY`].
  pub fn open(storage: Arc<dyn StorageBackend>) -> Self {
    Self::open_with_key(storage, DEFAULT_STORAGE_KEY)
  }

  /// Opens a cart persisted under `key`, restoring any previously persisted
  /// lines. An absent entry starts empty; an unparsable one is discarded with
  /// a warning and also starts empty. Restoration never fails the caller.
  pub fn open_with_key(storage: Arc<dyn StorageBackend>, key: impl Into<String>) -> Self {
    let key = key.into();

    let mut lines = match storage.load(&key) {
      Ok(Some(raw)) => match serde_json::from_str::<Vec<LineItem>>(&raw) {
        Ok(lines) => {
          debug!(key = %key, lines = lines.len(), "restored persisted cart");
          lines
        }
        Err(e) => {
          warn!(key = %key, error = %e, "persisted cart is unparsable; starting empty");
          Vec::new()
        }
      },
      Ok(None) => {
        debug!(key = %key, "no persisted cart; starting empty");
        Vec::new()
      }
      Err(e) => {
        warn!(key = %key, error = %e, "storage read failed; starting empty");
        Vec::new()
      }
    };

    // A persisted zero-quantity line violates the store invariant; drop it
    // rather than resurrect it.
    let restored = lines.len();
    lines.retain(|line| line.quantity >= 1);
    if lines.len() != restored {
      warn!(key = %key, dropped = restored - lines.len(), "dropped zero-quantity lines from persisted cart");
    }

    CartStore {
      inner: Arc::new(StoreInner {
        key,
        storage,
        lines: RwLock::new(lines),
        subscribers: Mutex::new(Vec::new()),
        next_subscription: AtomicU64::new(0),
      }),
    }
  }

  /// Cart backed by [`MemoryStorage`]: state lives for this process only.
  pub fn in_memory() -> Self {
    Self::open(Arc::new(MemoryStorage::new()))
  }

  // --- Mutations ---

  /// Adds `item` to the cart, merging by id.
  ///
  /// If a line with the same `id` exists, its quantity grows by
  /// `item.quantity` and a [`CartEvent::QuantityUpdated`] carrying the merged
  /// total is returned; the existing line's name, price and image are not
  /// updated from `item`. Otherwise `item` is appended in insertion order and
  /// [`CartEvent::ItemAdded`] is returned.
  ///
  /// Rejects `quantity == 0` and negative `unit_price` at this boundary
  /// instead of storing invalid state.
  pub fn add_item(&self, item: LineItem) -> CartResult<CartEvent> {
    if item.quantity == 0 {
      return Err(CartError::InvalidQuantity { id: item.id });
    }
    if item.unit_price.is_sign_negative() {
      return Err(CartError::NegativePrice {
        id: item.id,
        price: item.unit_price,
      });
    }

    let event = {
      let mut lines = self.inner.lines.write();
      match lines.iter_mut().find(|line| line.id == item.id) {
        Some(existing) => {
          existing.quantity += item.quantity;
          info!(id = %existing.id, quantity = existing.quantity, "merged addition into existing cart line");
          CartEvent::QuantityUpdated {
            id: existing.id.clone(),
            name: existing.name.clone(),
            quantity: existing.quantity,
          }
        }
        None => {
          info!(id = %item.id, quantity = item.quantity, "new line added to cart");
          let event = CartEvent::ItemAdded { item: item.clone() };
          lines.push(item);
          event
        }
      }
    };

    self.commit(&event)?;
    Ok(event)
  }

  /// Removes the line with `id`, if present. Removing an absent id is a
  /// no-op: `Ok(None)`, no signal. Removing the last line deletes the
  /// persisted entry entirely.
  pub fn remove_item(&self, id: &str) -> CartResult<Option<CartEvent>> {
    let removed = {
      let mut lines = self.inner.lines.write();
      let idx = lines.iter().position(|line| line.id == id);
      idx.map(|idx| lines.remove(idx))
    };

    let Some(item) = removed else {
      debug!(id, "remove requested for id not in cart; nothing to do");
      return Ok(None);
    };

    info!(id, name = %item.name, "line removed from cart");
    let event = CartEvent::ItemRemoved { item };
    self.commit(&event)?;
    Ok(Some(event))
  }

  /// Sets the quantity of the line with `id`.
  ///
  /// `quantity == 0` delegates to [`Self::remove_item`] (same signal, same
  /// persistence cleanup) — a zero-quantity line is never stored. A positive
  /// quantity for an absent id is a no-op: `Ok(None)`.
  pub fn update_quantity(&self, id: &str, quantity: u32) -> CartResult<Option<CartEvent>> {
    if quantity == 0 {
      return self.remove_item(id);
    }

    let updated = {
      let mut lines = self.inner.lines.write();
      lines.iter_mut().find(|line| line.id == id).map(|line| {
        line.quantity = quantity;
        CartEvent::QuantityUpdated {
          id: line.id.clone(),
          name: line.name.clone(),
          quantity,
        }
      })
    };

    let Some(event) = updated else {
      debug!(id, quantity, "quantity update for id not in cart; nothing to do");
      return Ok(None);
    };

    info!(id, quantity, "cart line quantity updated");
    self.commit(&event)?;
    Ok(Some(event))
  }

  /// Empties the cart and deletes the persisted entry.
  pub fn clear(&self) -> CartResult<CartEvent> {
    let removed = {
      let mut lines = self.inner.lines.write();
      std::mem::take(&mut *lines)
    };

    info!(lines = removed.len(), "cart cleared");
    let event = CartEvent::Cleared;
    self.commit(&event)?;
    Ok(event)
  }

  // --- Reads ---

  /// Snapshot of the cart lines in insertion order.
  pub fn items(&self) -> Vec<LineItem> {
    self.inner.lines.read().clone()
  }

  /// The line with `id`, if present.
  pub fn line(&self, id: &str) -> Option<LineItem> {
    self.inner.lines.read().iter().find(|line| line.id == id).cloned()
  }

  pub fn is_empty(&self) -> bool {
    self.inner.lines.read().is_empty()
  }

  /// Sum of quantities over all lines.
  pub fn total_items(&self) -> u64 {
    self.inner.lines.read().iter().map(|line| u64::from(line.quantity)).sum()
  }

  /// Sum of `unit_price * quantity` over all lines.
  pub fn total_price(&self) -> Decimal {
    self.inner.lines.read().iter().map(LineItem::subtotal).sum()
  }

  /// The key this cart persists under.
  pub fn storage_key(&self) -> &str {
    &self.inner.key
  }

  // --- Change notification ---

  /// Registers `callback` to run after every committed mutation, with the
  /// resulting [`CartEvent`]. Callbacks run on the mutating caller's thread,
  /// after the state change is visible, so any read from inside a callback
  /// observes the new state.
  pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
  where
    F: Fn(&CartEvent) + Send + Sync + 'static,
  {
    let id = SubscriptionId(self.inner.next_subscription.fetch_add(1, Ordering::Relaxed));
    self.inner.subscribers.lock().push((id, Arc::new(callback)));
    id
  }

  /// Drops the subscription. Returns `false` if `id` was already gone.
  pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
    let mut subscribers = self.inner.subscribers.lock();
    let before = subscribers.len();
    subscribers.retain(|(sid, _)| *sid != id);
    subscribers.len() != before
  }

  // --- Internals ---

  /// Persists the current lines, then notifies subscribers of `event`.
  ///
  /// The in-memory cart is authoritative: subscribers are notified even when
  /// the write fails, and the storage error is surfaced afterwards so the
  /// caller can report it without the mutation itself being lost.
  fn commit(&self, event: &CartEvent) -> CartResult<()> {
    let persisted = self.persist();
    self.notify(event);
    persisted
  }

  fn persist(&self) -> CartResult<()> {
    let serialized = {
      let lines = self.inner.lines.read();
      if lines.is_empty() {
        None
      } else {
        Some(serde_json::to_string(&*lines)?)
      }
    };

    let result = match &serialized {
      // An emptied cart deletes the entry outright, distinguishing "emptied"
      // from "never used".
      None => self.inner.storage.remove(&self.inner.key),
      Some(json) => self.inner.storage.store(&self.inner.key, json),
    };

    result.map_err(|source| {
      warn!(key = %self.inner.key, error = %source, "failed to persist cart");
      CartError::Storage {
        key: self.inner.key.clone(),
        source,
      }
    })
  }

  fn notify(&self, event: &CartEvent) {
    // Snapshot the callbacks so none of our locks are held while they run;
    // a subscriber may subscribe, unsubscribe, or read the store.
    let subscribers: Vec<Subscriber> = self
      .inner
      .subscribers
      .lock()
      .iter()
      .map(|(_, subscriber)| Arc::clone(subscriber))
      .collect();

    for subscriber in subscribers {
      subscriber(event);
    }
  }
}

impl std::fmt::Debug for CartStore {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CartStore")
      .field("key", &self.inner.key)
      .field("lines", &self.inner.lines.read().len())
      .finish()
  }
}
