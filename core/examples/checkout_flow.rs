// core/examples/checkout_flow.rs

use std::sync::Arc;
use std::time::Duration;

use carrinho::{simulate_checkout, CartError, CartEvent, CartStore, JsonFileStorage, LineItem};
use rust_decimal::Decimal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), CartError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Checkout Flow Example ---");

  // 1. A file-backed cart: run this example twice and the second run starts
  //    from whatever the first one left persisted.
  let storage = Arc::new(JsonFileStorage::new(std::env::temp_dir().join("carrinho-demo")));
  let store = CartStore::open(storage);
  info!("restored cart holds {} item(s)", store.total_items());

  // 2. A "toast" consumer: turns cart events into user-facing messages.
  store.subscribe(|event| match event {
    CartEvent::ItemAdded { item } => info!("[toast] {} foi adicionado ao carrinho", item.name),
    CartEvent::QuantityUpdated { name, quantity, .. } => {
      info!("[toast] {} agora tem {} unidades no carrinho", name, quantity)
    }
    CartEvent::ItemRemoved { item } => info!("[toast] {} foi removido do carrinho", item.name),
    CartEvent::Cleared => info!("[toast] Todos os itens foram removidos do carrinho"),
  });

  store.add_item(LineItem::product(
    "product-3-g-blue",
    "Moletom Atlética (G, Azul)",
    Decimal::new(12990, 2),
    1,
    "/images/products/moletom.jpg",
  ))?;
  store.add_item(LineItem::ticket(
    "ticket-2",
    "Torneio de Futsal",
    Decimal::new(2000, 2),
    2,
    "/images/events/torneio-futsal.jpg",
    "28/06 - 14h",
  ))?;

  // 3. Checkout: a fixed, always-successful delay standing in for payment
  //    processing, after which the cart (and its persisted entry) is cleared.
  //    The shortened delay keeps the demo snappy; the default is
  //    carrinho::CHECKOUT_PROCESSING_DELAY.
  let confirmation = simulate_checkout(&store, Duration::from_millis(500)).await?;

  info!(
    "order {} confirmed: {} item(s), total R$ {}",
    confirmation.order_ref, confirmation.total_items, confirmation.total_price
  );
  info!("cart is now empty: {}", store.is_empty());

  Ok(())
}
