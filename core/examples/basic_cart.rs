// core/examples/basic_cart.rs

use carrinho::{CartError, CartEvent, CartStore, LineItem};
use rust_decimal::Decimal;
use tracing::info;

fn main() -> Result<(), CartError> {
  // Initialize tracing (optional, for demonstration)
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Basic Cart Example ---");

  // 1. Open a cart. In a real storefront this would be a JsonFileStorage so
  //    the cart survives restarts; in-memory keeps the demo self-contained.
  let store = CartStore::in_memory();

  // 2. Subscribe a "header badge": re-renders its counter on every change.
  let badge = store.clone();
  store.subscribe(move |event| {
    info!("[badge] {} items in cart (after {:?})", badge.total_items(), event);
  });

  // 3. Catalog pages add items. Ids encode the purchased configuration, so
  //    the same shirt in the same size/colour merges into one line.
  let shirt = LineItem::product(
    "product-1-m-black",
    "Camisa Oficial (M, Preta)",
    Decimal::new(8990, 2),
    1,
    "/images/products/camisa-oficial.jpg",
  );
  store.add_item(shirt.clone())?;
  store.add_item(shirt)?; // merges: one line, quantity 2

  store.add_item(LineItem::ticket(
    "ticket-5",
    "Festa de Integração",
    Decimal::new(4500, 2),
    1,
    "/images/events/festa-integracao.jpg",
    "12/05 - 19h",
  ))?;

  // 4. The cart page tweaks quantities; setting 0 removes the line.
  if let Some(CartEvent::ItemRemoved { item }) = store.update_quantity("ticket-5", 0)? {
    info!("removed '{}' by setting its quantity to 0", item.name);
  }

  // 5. Derived totals are always consistent with the stored lines.
  info!(
    "cart now holds {} item(s), total R$ {}",
    store.total_items(),
    store.total_price()
  );

  Ok(())
}
