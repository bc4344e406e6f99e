// core/src/checkout.rs

//! Simulated checkout: a fixed-duration stand-in for a real payment flow.
//!
//! There is deliberately no failure path, retry, or cancellation here. Any
//! integration with an actual payment or inventory backend must replace this
//! module, not extend it.

use std::time::Duration;

use rust_decimal::Decimal;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::CartResult;
use crate::item::LineItem;
use crate::store::CartStore;

/// Default duration of the simulated payment processing.
pub const CHECKOUT_PROCESSING_DELAY: Duration = Duration::from_secs(2);

/// What the shopper ordered, captured before the cart was cleared.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderConfirmation {
  /// Mock reference for the simulated order; no backing order record exists.
  pub order_ref: String,
  pub lines: Vec<LineItem>,
  pub total_items: u64,
  pub total_price: Decimal,
}

/// Runs the simulated checkout: snapshots the cart, waits `processing_delay`
/// (the timer always "succeeds"), clears the cart — deleting its persisted
/// entry and signalling [`crate::CartEvent::Cleared`] — and returns the
/// confirmation built from the pre-clear snapshot.
///
/// An empty cart checks out successfully with an empty confirmation; keeping
/// the button disabled for an empty cart is the consumer's concern.
#[instrument(skip(store), fields(key = %store.storage_key()))]
pub async fn simulate_checkout(store: &CartStore, processing_delay: Duration) -> CartResult<OrderConfirmation> {
  let lines = store.items();
  let total_items = store.total_items();
  let total_price = store.total_price();

  info!(total_items, %total_price, "simulating payment processing");
  tokio::time::sleep(processing_delay).await;

  let order_ref = format!("mock_order_{}", Uuid::new_v4());
  store.clear()?;

  info!(%order_ref, "simulated checkout completed; cart cleared");
  Ok(OrderConfirmation {
    order_ref,
    lines,
    total_items,
    total_price,
  })
}
