// core/src/store/mod.rs

//! The persistence seam. The storefront owns the orders table; the payment
//! core only needs these three operations on it.

pub mod memory;

use crate::error::{VnpayError, VnpayResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

pub use memory::MemoryOrderStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
  Pending,
  Approved,
  Cancelled,
}

impl OrderStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      OrderStatus::Pending => "pending",
      OrderStatus::Approved => "approved",
      OrderStatus::Cancelled => "cancelled",
    }
  }

  pub fn is_terminal(&self) -> bool {
    !matches!(self, OrderStatus::Pending)
  }
}

impl FromStr for OrderStatus {
  type Err = VnpayError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "pending" => Ok(OrderStatus::Pending),
      "approved" => Ok(OrderStatus::Approved),
      "cancelled" => Ok(OrderStatus::Cancelled),
      other => Err(VnpayError::store(
        "decode_status",
        anyhow::anyhow!("unknown order status '{}'", other),
      )),
    }
  }
}

impl std::fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// The columns of an order the reconciliation reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSnapshot {
  pub order_code: String,
  pub payment_code: String,
  pub status: OrderStatus,
  /// Major units, exact.
  pub total_amount: Decimal,
}

/// Result of linking a transaction ref to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachOutcome {
  Attached,
  OrderNotFound,
  NotPending(OrderStatus),
}

#[async_trait]
pub trait OrderStore: Send + Sync {
  /// Marks a pending order as paid by gateway and records `payment_code` on it.
  async fn attach_payment_code(&self, order_code: &str, payment_code: &str) -> VnpayResult<AttachOutcome>;

  async fn find_by_payment_code(&self, payment_code: &str) -> VnpayResult<Option<OrderSnapshot>>;

  /// Moves the order from `pending` to `target` in one conditional write.
  ///
  /// Returns `false` when no pending order matched, which includes losing a
  /// race against a concurrent duplicate notification. `paid_at` is stamped
  /// only when present.
  async fn transition_from_pending(
    &self,
    payment_code: &str,
    target: OrderStatus,
    paid_at: Option<DateTime<Utc>>,
  ) -> VnpayResult<bool>;
}

/// Bounds one store round trip. Expiry is reported as a persistence error.
pub async fn with_store_timeout<T, F>(operation: &'static str, limit: Duration, fut: F) -> VnpayResult<T>
where
  F: Future<Output = VnpayResult<T>>,
{
  match tokio::time::timeout(limit, fut).await {
    Ok(result) => result,
    Err(_) => Err(VnpayError::StoreTimeout {
      operation,
      timeout_ms: limit.as_millis(),
    }),
  }
}
