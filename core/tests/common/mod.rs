// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use std::time::Duration;
use tracing::Level;
use vnpay::pipeline::{ContextData, Handler, PipelineControl};
use vnpay::{
  canonical_query, AttachOutcome, GatewayConfig, HmacSigner, MemoryOrderStore, NotificationPayload, OrderSnapshot,
  OrderStatus, OrderStore, ValueEncoding, VnpayError, VnpayResult,
};

pub const TEST_TMN_CODE: &str = "TESTTMN1";
pub const TEST_HASH_SECRET: &str = "TESTSECRETKEY";
pub const TEST_RETURN_URL: &str = "https://shop.example/payment/vnpay_return";

// --- Helper for Tracing Setup (call once per test run if needed) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Gateway fixtures ---
pub fn test_config() -> GatewayConfig {
  GatewayConfig::new(TEST_TMN_CODE, TEST_HASH_SECRET, TEST_RETURN_URL)
}

pub fn test_signer() -> HmacSigner {
  HmacSigner::new(TEST_HASH_SECRET).unwrap()
}

/// IPN fields as the gateway would send them for `txn_ref`.
pub fn ipn_fields(txn_ref: &str, amount_minor: i64, response_code: &str, transaction_status: &str) -> Vec<(String, String)> {
  vec![
    ("vnp_Amount".to_string(), amount_minor.to_string()),
    ("vnp_BankCode".to_string(), "NCB".to_string()),
    ("vnp_BankTranNo".to_string(), "VNP14226112".to_string()),
    ("vnp_CardType".to_string(), "ATM".to_string()),
    ("vnp_OrderInfo".to_string(), "Thanh toan don hang: ORD123".to_string()),
    ("vnp_PayDate".to_string(), "20240102103015".to_string()),
    ("vnp_ResponseCode".to_string(), response_code.to_string()),
    ("vnp_TmnCode".to_string(), TEST_TMN_CODE.to_string()),
    ("vnp_TransactionNo".to_string(), "14226112".to_string()),
    ("vnp_TransactionStatus".to_string(), transaction_status.to_string()),
    ("vnp_TxnRef".to_string(), txn_ref.to_string()),
  ]
}

/// Signs `fields` the way the gateway does and appends the hash fields.
pub fn sign_fields(fields: Vec<(String, String)>) -> Vec<(String, String)> {
  let canonical = canonical_query(fields.iter().map(|(k, v)| (k.as_str(), v.as_str())), ValueEncoding::Raw);
  let hash = test_signer().sign(&canonical);
  let mut signed = fields;
  signed.push(("vnp_SecureHashType".to_string(), "HmacSHA512".to_string()));
  signed.push(("vnp_SecureHash".to_string(), hash));
  signed
}

pub fn signed_payload(fields: Vec<(String, String)>) -> NotificationPayload {
  NotificationPayload::from_pairs(sign_fields(fields))
}

pub fn replace_field(fields: &mut [(String, String)], name: &str, value: &str) {
  for (field, current) in fields.iter_mut() {
    if field == name {
      *current = value.to_string();
    }
  }
}

/// A store holding one pending order already linked to `txn_ref`.
pub async fn store_with_linked_order(order_code: &str, total: Decimal, txn_ref: &str) -> MemoryOrderStore {
  let store = MemoryOrderStore::new();
  store.insert_pending(order_code, total);
  let outcome = store.attach_payment_code(order_code, txn_ref).await.unwrap();
  assert_eq!(outcome, AttachOutcome::Attached);
  store
}

// --- Stores with injected behaviour ---

/// Every operation fails.
#[derive(Debug, Default)]
pub struct FailingStore;

#[async_trait]
impl OrderStore for FailingStore {
  async fn attach_payment_code(&self, _order_code: &str, _payment_code: &str) -> VnpayResult<AttachOutcome> {
    Err(VnpayError::store("attach_payment_code", anyhow::anyhow!("connection reset")))
  }

  async fn find_by_payment_code(&self, _payment_code: &str) -> VnpayResult<Option<OrderSnapshot>> {
    Err(VnpayError::store("find_by_payment_code", anyhow::anyhow!("connection reset")))
  }

  async fn transition_from_pending(
    &self,
    _payment_code: &str,
    _target: OrderStatus,
    _paid_at: Option<DateTime<Utc>>,
  ) -> VnpayResult<bool> {
    Err(VnpayError::store("transition_from_pending", anyhow::anyhow!("connection reset")))
  }
}

/// Delegates to a memory store but sleeps before answering.
#[derive(Debug, Clone)]
pub struct SlowStore {
  pub inner: MemoryOrderStore,
  pub delay: Duration,
}

#[async_trait]
impl OrderStore for SlowStore {
  async fn attach_payment_code(&self, order_code: &str, payment_code: &str) -> VnpayResult<AttachOutcome> {
    tokio::time::sleep(self.delay).await;
    self.inner.attach_payment_code(order_code, payment_code).await
  }

  async fn find_by_payment_code(&self, payment_code: &str) -> VnpayResult<Option<OrderSnapshot>> {
    tokio::time::sleep(self.delay).await;
    self.inner.find_by_payment_code(payment_code).await
  }

  async fn transition_from_pending(
    &self,
    payment_code: &str,
    target: OrderStatus,
    paid_at: Option<DateTime<Utc>>,
  ) -> VnpayResult<bool> {
    tokio::time::sleep(self.delay).await;
    self.inner.transition_from_pending(payment_code, target, paid_at).await
  }
}

/// Delegates to a memory store and counts writes.
#[derive(Debug, Clone, Default)]
pub struct CountingStore {
  pub inner: MemoryOrderStore,
  pub attach_calls: Arc<AtomicUsize>,
  pub transition_calls: Arc<AtomicUsize>,
  pub transitions_won: Arc<AtomicUsize>,
  /// Delay after every read, so concurrent runs see the same pending snapshot.
  pub read_delay: Option<Duration>,
}

impl CountingStore {
  pub fn wrapping(inner: MemoryOrderStore) -> Self {
    Self {
      inner,
      ..Default::default()
    }
  }

  pub fn writes(&self) -> usize {
    self.attach_calls.load(Ordering::SeqCst) + self.transition_calls.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl OrderStore for CountingStore {
  async fn attach_payment_code(&self, order_code: &str, payment_code: &str) -> VnpayResult<AttachOutcome> {
    self.attach_calls.fetch_add(1, Ordering::SeqCst);
    self.inner.attach_payment_code(order_code, payment_code).await
  }

  async fn find_by_payment_code(&self, payment_code: &str) -> VnpayResult<Option<OrderSnapshot>> {
    let found = self.inner.find_by_payment_code(payment_code).await;
    if let Some(delay) = self.read_delay {
      tokio::time::sleep(delay).await;
    }
    found
  }

  async fn transition_from_pending(
    &self,
    payment_code: &str,
    target: OrderStatus,
    paid_at: Option<DateTime<Utc>>,
  ) -> VnpayResult<bool> {
    self.transition_calls.fetch_add(1, Ordering::SeqCst);
    let won = self.inner.transition_from_pending(payment_code, target, paid_at).await?;
    if won {
      self.transitions_won.fetch_add(1, Ordering::SeqCst);
    }
    Ok(won)
  }
}

// --- Pipeline engine fixtures ---
#[derive(Clone, Debug, Default)]
pub struct TestContext {
  pub counter: i32,
  pub message: String,
  pub steps_executed: Vec<String>,
  pub should_stop_at: Option<String>,
}

pub fn create_simple_handler(step_name: &'static str, message_to_append: &'static str) -> Handler<TestContext> {
  Box::new(move |ctx: ContextData<TestContext>| {
    Box::pin(async move {
      let mut guard = ctx.write();
      guard.counter += 1;
      guard.message.push_str(message_to_append);
      guard.steps_executed.push(step_name.to_string());
      tracing::debug!(target: "test_handlers", step = %step_name, "executed, counter: {}", guard.counter);
      if guard.should_stop_at.as_deref() == Some(step_name) {
        return Ok(PipelineControl::Stop);
      }
      Ok(PipelineControl::Continue)
    })
  })
}

pub fn create_failing_handler(step_name: &'static str) -> Handler<TestContext> {
  Box::new(move |ctx: ContextData<TestContext>| {
    Box::pin(async move {
      ctx.write().steps_executed.push(step_name.to_string());
      Err(VnpayError::store("test_write", anyhow::anyhow!("{} failed", step_name)))
    })
  })
}
