// core/examples/verify_ipn.rs

use rust_decimal_macros::dec;
use std::sync::Arc;
use tracing::info;
use vnpay::{
  canonical_query, GatewayConfig, HmacSigner, MemoryOrderStore, NotificationPayload, NotificationVerifier, OrderStore,
  ValueEncoding, VnpayError,
};

const SECRET: &str = "DEMOSECRETKEY";
const TXN_REF: &str = "20240102100405000123456";

// Plays the gateway: signs the callback parameters with the shared secret.
fn gateway_callback(response_code: &str) -> Result<NotificationPayload, VnpayError> {
  let mut pairs = vec![
    ("vnp_Amount".to_string(), "5000000".to_string()),
    ("vnp_BankCode".to_string(), "NCB".to_string()),
    ("vnp_OrderInfo".to_string(), "Thanh toan don hang: ORD123".to_string()),
    ("vnp_ResponseCode".to_string(), response_code.to_string()),
    ("vnp_TmnCode".to_string(), "DEMOTMN1".to_string()),
    ("vnp_TransactionStatus".to_string(), response_code.to_string()),
    ("vnp_TxnRef".to_string(), TXN_REF.to_string()),
  ];
  let canonical = canonical_query(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())), ValueEncoding::Raw);
  pairs.push(("vnp_SecureHash".to_string(), HmacSigner::new(SECRET)?.sign(&canonical)));
  Ok(NotificationPayload::from_pairs(pairs))
}

#[tokio::main]
async fn main() -> Result<(), VnpayError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Verify IPN Example ---");

  let store = MemoryOrderStore::new();
  store.insert_pending("ORD123", dec!(50000));
  store.attach_payment_code("ORD123", TXN_REF).await?;

  let config = GatewayConfig::new("DEMOTMN1", SECRET, "http://localhost:5173/payment/vnpay_return");
  let verifier = NotificationVerifier::new(Arc::new(config), Arc::new(store.clone()))?;

  // The browser comes back first; this is informational only.
  let returned = verifier.verify_return(&gateway_callback("00")?);
  info!("Return page: signature_valid={}, paid={}", returned.signature_valid, returned.paid);

  // The gateway's server-to-server call settles the order.
  let first = verifier.handle_ipn(gateway_callback("00")?).await;
  info!("First IPN answered with {:?}", first);

  // Gateways resend. The duplicate is acknowledged as already confirmed and changes nothing.
  let second = verifier.handle_ipn(gateway_callback("00")?).await;
  info!("Duplicate IPN answered with {:?}", second);

  info!("Final order status: {:?}", store.status_of("ORD123"));
  Ok(())
}
