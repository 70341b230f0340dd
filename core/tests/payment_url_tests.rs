// tests/payment_url_tests.rs
mod common;

use common::*;
use rust_decimal_macros::dec;
use serial_test::serial;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use vnpay::{CreatePaymentUrl, MemoryOrderStore, OrderStatus, OrderStore, PaymentUrlBuilder, VnpayError};

fn query_of(url: &str) -> HashMap<String, String> {
  let (_, query) = url.split_once('?').unwrap();
  query
    .split('&')
    .map(|pair| {
      let (k, v) = pair.split_once('=').unwrap();
      (k.to_string(), v.to_string())
    })
    .collect()
}

fn checkout(order_code: &str, amount: rust_decimal::Decimal) -> CreatePaymentUrl {
  CreatePaymentUrl {
    amount,
    order_code: order_code.to_string(),
    client_ip: "::1".to_string(),
  }
}

#[tokio::test]
#[serial]
async fn test_payment_url_for_ord123_is_signed_and_persisted() {
  setup_tracing();
  let store = MemoryOrderStore::new();
  store.insert_pending("ORD123", dec!(50000));
  let builder = PaymentUrlBuilder::new(Arc::new(test_config()), Arc::new(store.clone())).unwrap();

  let url = builder.create_payment_url(checkout("ORD123", dec!(50000))).await.unwrap();

  assert!(url.redirect_url.starts_with("https://sandbox.vnpayment.vn/paymentv2/vpcpay.html?"));
  let query = query_of(&url.redirect_url);
  assert_eq!(query["vnp_TxnRef"], url.transaction_ref);
  assert_eq!(query["vnp_Amount"], "5000000");
  assert_eq!(query["vnp_IpAddr"], "127.0.0.1");
  assert_eq!(query["vnp_Version"], "2.1.0");
  assert_eq!(query["vnp_Command"], "pay");
  assert_eq!(query["vnp_CurrCode"], "VND");
  assert_eq!(query["vnp_TmnCode"], TEST_TMN_CODE);
  assert_eq!(query["vnp_OrderInfo"], "Thanh+toan+don+hang%3A+ORD123");
  assert_eq!(query["vnp_CreateDate"].len(), 14);

  let hash = &query["vnp_SecureHash"];
  assert_eq!(hash.len(), 128);
  assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
  assert!(url.redirect_url.ends_with(&format!("&vnp_SecureHash={hash}")));

  assert_eq!(store.payment_code_of("ORD123"), Some(url.transaction_ref.clone()));
  assert_eq!(store.status_of("ORD123"), Some(OrderStatus::Pending));
}

#[tokio::test]
#[serial]
async fn test_redirect_signature_verifies_over_the_query() {
  setup_tracing();
  let store = MemoryOrderStore::new();
  store.insert_pending("ORD7", dec!(120000));
  let builder = PaymentUrlBuilder::new(Arc::new(test_config()), Arc::new(store)).unwrap();

  let url = builder.create_payment_url(checkout("ORD7", dec!(120000))).await.unwrap();
  let (_, query) = url.redirect_url.split_once('?').unwrap();
  let (signed_part, hash) = query.rsplit_once("&vnp_SecureHash=").unwrap();

  assert!(test_signer().verify(signed_part, hash));
}

#[tokio::test]
#[serial]
async fn test_each_call_gets_a_fresh_transaction_ref() {
  setup_tracing();
  let store = MemoryOrderStore::new();
  store.insert_pending("ORD1", dec!(1000));
  let builder = PaymentUrlBuilder::new(Arc::new(test_config()), Arc::new(store.clone())).unwrap();

  let first = builder.create_payment_url(checkout("ORD1", dec!(1000))).await.unwrap();
  let second = builder.create_payment_url(checkout("ORD1", dec!(1000))).await.unwrap();

  assert_ne!(first.transaction_ref, second.transaction_ref);
  assert_eq!(store.payment_code_of("ORD1"), Some(second.transaction_ref));
}

#[tokio::test]
#[serial]
async fn test_invalid_amounts_are_rejected_before_any_write() {
  setup_tracing();
  let inner = MemoryOrderStore::new();
  inner.insert_pending("ORD2", dec!(100));
  let store = CountingStore::wrapping(inner.clone());
  let builder = PaymentUrlBuilder::new(Arc::new(test_config()), Arc::new(store.clone())).unwrap();

  for amount in [dec!(0), dec!(-5), dec!(0.004)] {
    let err = builder.create_payment_url(checkout("ORD2", amount)).await.unwrap_err();
    assert!(err.is_validation(), "amount {amount} gave {err}");
  }
  let err = builder.create_payment_url(checkout("", dec!(100))).await.unwrap_err();
  assert!(matches!(err, VnpayError::MissingOrderCode));

  assert_eq!(store.writes(), 0);
  assert_eq!(inner.payment_code_of("ORD2"), None);
}

#[tokio::test]
#[serial]
async fn test_persistence_failure_returns_no_url() {
  setup_tracing();
  let builder = PaymentUrlBuilder::new(Arc::new(test_config()), Arc::new(FailingStore)).unwrap();

  let err = builder.create_payment_url(checkout("ORD3", dec!(100))).await.unwrap_err();
  assert!(err.is_persistence());
}

#[tokio::test]
#[serial]
async fn test_slow_store_times_out() {
  setup_tracing();
  let inner = MemoryOrderStore::new();
  inner.insert_pending("ORD4", dec!(100));
  let store = SlowStore {
    inner: inner.clone(),
    delay: Duration::from_millis(500),
  };
  let config = test_config().with_store_timeout(Duration::from_millis(20));
  let builder = PaymentUrlBuilder::new(Arc::new(config), Arc::new(store)).unwrap();

  let err = builder.create_payment_url(checkout("ORD4", dec!(100))).await.unwrap_err();
  assert!(matches!(err, VnpayError::StoreTimeout { operation: "attach_payment_code", .. }));
  assert_eq!(inner.payment_code_of("ORD4"), None);
}

#[tokio::test]
#[serial]
async fn test_unknown_and_settled_orders_are_refused() {
  setup_tracing();
  let store = store_with_linked_order("PAID1", dec!(100), "TXN-PAID1").await;
  assert!(store
    .transition_from_pending("TXN-PAID1", OrderStatus::Approved, None)
    .await
    .unwrap());
  let builder = PaymentUrlBuilder::new(Arc::new(test_config()), Arc::new(store.clone())).unwrap();

  let err = builder.create_payment_url(checkout("NOPE", dec!(100))).await.unwrap_err();
  assert!(matches!(err, VnpayError::OrderNotFound { .. }));

  let err = builder.create_payment_url(checkout("PAID1", dec!(100))).await.unwrap_err();
  assert!(matches!(err, VnpayError::OrderNotPending { .. }));
  assert_eq!(store.payment_code_of("PAID1"), Some("TXN-PAID1".to_string()));
}
