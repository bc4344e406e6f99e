// core/src/event.rs

//! Signals emitted by the cart store after each committed mutation.

use crate::item::LineItem;

/// Outcome of a cart mutation, delivered to the caller and to every
/// subscriber. Carries enough detail for consumers to render a notification
/// (item name, merged quantity) without re-reading the store.
#[derive(Debug, Clone, PartialEq)]
pub enum CartEvent {
  /// A new line was appended to the cart.
  ItemAdded { item: LineItem },
  /// An existing line's quantity changed (merge on add, or an explicit
  /// update). `quantity` is the resulting total for that line.
  QuantityUpdated { id: String, name: String, quantity: u32 },
  /// A line was removed, either directly or by updating its quantity to 0.
  ItemRemoved { item: LineItem },
  /// All lines were removed and the persisted entry deleted.
  Cleared,
}

/// Handle returned by `CartStore::subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);
