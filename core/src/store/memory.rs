// core/src/store/memory.rs

use super::{AttachOutcome, OrderSnapshot, OrderStatus, OrderStore};
use crate::error::VnpayResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone)]
struct MemoryOrder {
  total_amount: Decimal,
  status: OrderStatus,
  payment_code: Option<String>,
  paid_at: Option<DateTime<Utc>>,
}

/// Order table held in process memory. Every operation takes the single lock,
/// so the conditional transition is atomic exactly like the SQL version.
#[derive(Debug, Clone, Default)]
pub struct MemoryOrderStore {
  orders: Arc<Mutex<HashMap<String, MemoryOrder>>>,
}

impl MemoryOrderStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds (or resets) a pending order.
  pub fn insert_pending(&self, order_code: impl Into<String>, total_amount: Decimal) {
    self.orders.lock().insert(
      order_code.into(),
      MemoryOrder {
        total_amount,
        status: OrderStatus::Pending,
        payment_code: None,
        paid_at: None,
      },
    );
  }

  pub fn status_of(&self, order_code: &str) -> Option<OrderStatus> {
    self.orders.lock().get(order_code).map(|order| order.status)
  }

  pub fn payment_code_of(&self, order_code: &str) -> Option<String> {
    self.orders.lock().get(order_code).and_then(|order| order.payment_code.clone())
  }

  pub fn paid_at_of(&self, order_code: &str) -> Option<DateTime<Utc>> {
    self.orders.lock().get(order_code).and_then(|order| order.paid_at)
  }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
  async fn attach_payment_code(&self, order_code: &str, payment_code: &str) -> VnpayResult<AttachOutcome> {
    let mut orders = self.orders.lock();
    let Some(order) = orders.get_mut(order_code) else {
      return Ok(AttachOutcome::OrderNotFound);
    };
    if order.status != OrderStatus::Pending {
      return Ok(AttachOutcome::NotPending(order.status));
    }
    order.payment_code = Some(payment_code.to_string());
    Ok(AttachOutcome::Attached)
  }

  async fn find_by_payment_code(&self, payment_code: &str) -> VnpayResult<Option<OrderSnapshot>> {
    let orders = self.orders.lock();
    Ok(
      orders
        .iter()
        .find(|(_, order)| order.payment_code.as_deref() == Some(payment_code))
        .map(|(code, order)| OrderSnapshot {
          order_code: code.clone(),
          payment_code: payment_code.to_string(),
          status: order.status,
          total_amount: order.total_amount,
        }),
    )
  }

  async fn transition_from_pending(
    &self,
    payment_code: &str,
    target: OrderStatus,
    paid_at: Option<DateTime<Utc>>,
  ) -> VnpayResult<bool> {
    let mut orders = self.orders.lock();
    let pending = orders
      .values_mut()
      .find(|order| order.payment_code.as_deref() == Some(payment_code) && order.status == OrderStatus::Pending);
    match pending {
      Some(order) => {
        order.status = target;
        if paid_at.is_some() {
          order.paid_at = paid_at;
        }
        Ok(true)
      }
      None => Ok(false),
    }
  }
}
