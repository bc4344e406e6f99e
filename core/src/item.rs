// core/src/item.rs

//! Line-item model for the cart: one purchasable configuration plus a quantity.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Informational tag distinguishing shop products from event tickets.
/// Does not affect pricing or merge behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
  Product,
  Ticket,
}

/// One entry in the cart.
///
/// `id` is the de-duplication key: it already encodes the purchased
/// configuration (product id plus selected size/colour, or `ticket-<event>`),
/// so two additions with the same `id` merge into a single line by summing
/// quantity. `name` likewise carries any variant suffix.
///
/// Serialized with the camelCase field names of the persisted cart layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
  pub id: String,
  pub name: String,
  /// Non-negative currency value, two-decimal precision expected.
  pub unit_price: Decimal,
  /// Always >= 1 once stored; 0 is rejected or treated as removal.
  pub quantity: u32,
  /// Opaque reference to a display image.
  pub image_ref: String,
  pub kind: ItemKind,
  /// Descriptive occurrence date, present only for `Ticket` lines.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub event_occurs_at: Option<String>,
}

impl LineItem {
  /// Convenience constructor for a shop product line.
  pub fn product(
    id: impl Into<String>,
    name: impl Into<String>,
    unit_price: Decimal,
    quantity: u32,
    image_ref: impl Into<String>,
  ) -> Self {
    LineItem {
      id: id.into(),
      name: name.into(),
      unit_price,
      quantity,
      image_ref: image_ref.into(),
      kind: ItemKind::Product,
      event_occurs_at: None,
    }
  }

  /// Convenience constructor for an event-ticket line.
  pub fn ticket(
    id: impl Into<String>,
    name: impl Into<String>,
    unit_price: Decimal,
    quantity: u32,
    image_ref: impl Into<String>,
    event_occurs_at: impl Into<String>,
  ) -> Self {
    LineItem {
      id: id.into(),
      name: name.into(),
      unit_price,
      quantity,
      image_ref: image_ref.into(),
      kind: ItemKind::Ticket,
      event_occurs_at: Some(event_occurs_at.into()),
    }
  }

  /// Line subtotal: `unit_price * quantity`.
  pub fn subtotal(&self) -> Decimal {
    self.unit_price * Decimal::from(self.quantity)
  }
}
