// core/examples/build_payment_url.rs

use rust_decimal_macros::dec;
use std::sync::Arc;
use tracing::info;
use vnpay::{CreatePaymentUrl, GatewayConfig, MemoryOrderStore, PaymentUrlBuilder, VnpayError};

#[tokio::main]
async fn main() -> Result<(), VnpayError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Build Payment URL Example ---");

  // 1. Merchant credentials. The sandbox payment URL is the default.
  let config = GatewayConfig::new("DEMOTMN1", "DEMOSECRETKEY", "http://localhost:5173/payment/vnpay_return")
    .with_ipn_url("https://shop.example/api/orders/vnpay_ipn");

  // 2. An order placed earlier with payment method "vnpay".
  let store = MemoryOrderStore::new();
  store.insert_pending("ORD123", dec!(50000));

  // 3. Build the redirect. The transaction ref is stored on the order first.
  let builder = PaymentUrlBuilder::new(Arc::new(config), Arc::new(store.clone()))?;
  let url = builder
    .create_payment_url(CreatePaymentUrl {
      amount: dec!(50000),
      order_code: "ORD123".to_string(),
      client_ip: "::1".to_string(),
    })
    .await?;

  info!("Redirect the buyer to: {}", url.redirect_url);
  info!(
    "Order ORD123 now carries payment code {:?}",
    store.payment_code_of("ORD123")
  );
  assert_eq!(store.payment_code_of("ORD123"), Some(url.transaction_ref));

  Ok(())
}
