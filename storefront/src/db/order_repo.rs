// storefront/src/db/order_repo.rs

use crate::models::{OrderRow, PAYMENT_METHOD_VNPAY};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::MySqlPool;
use tracing::{error, instrument};
use vnpay::{AttachOutcome, OrderSnapshot, OrderStatus, OrderStore, VnpayError, VnpayResult};

/// `OrderStore` over the shop's `orders` table.
#[derive(Debug, Clone)]
pub struct MySqlOrderStore {
  pool: MySqlPool,
}

impl MySqlOrderStore {
  pub fn new(pool: MySqlPool) -> Self {
    Self { pool }
  }
}

fn db_error(operation: &'static str, e: sqlx::Error) -> VnpayError {
  error!(operation, error = %e, "Order store query failed.");
  VnpayError::store(operation, e)
}

#[async_trait]
impl OrderStore for MySqlOrderStore {
  #[instrument(name = "MySqlOrderStore::attach_payment_code", skip(self))]
  async fn attach_payment_code(&self, order_code: &str, payment_code: &str) -> VnpayResult<AttachOutcome> {
    let updated = sqlx::query(
      "UPDATE orders SET paymentMethod = ?, paymentCode = ? WHERE code = ? AND status = 'pending'",
    )
    .bind(PAYMENT_METHOD_VNPAY)
    .bind(payment_code)
    .bind(order_code)
    .execute(&self.pool)
    .await
    .map_err(|e| db_error("attach_payment_code", e))?;

    if updated.rows_affected() > 0 {
      return Ok(AttachOutcome::Attached);
    }

    // MySQL reports changed rows, not matched rows: re-read to tell the cases apart.
    let status: Option<String> = sqlx::query_scalar("SELECT CAST(status AS CHAR) FROM orders WHERE code = ?")
      .bind(order_code)
      .fetch_optional(&self.pool)
      .await
      .map_err(|e| db_error("attach_payment_code", e))?;

    match status {
      None => Ok(AttachOutcome::OrderNotFound),
      Some(status) => match status.parse::<OrderStatus>()? {
        OrderStatus::Pending => Ok(AttachOutcome::Attached),
        settled => Ok(AttachOutcome::NotPending(settled)),
      },
    }
  }

  #[instrument(name = "MySqlOrderStore::find_by_payment_code", skip(self))]
  async fn find_by_payment_code(&self, payment_code: &str) -> VnpayResult<Option<OrderSnapshot>> {
    let row: Option<OrderRow> = sqlx::query_as(
      "SELECT code, paymentCode, CAST(status AS CHAR) AS status, totalAmount FROM orders WHERE paymentCode = ? LIMIT 1",
    )
    .bind(payment_code)
    .fetch_optional(&self.pool)
    .await
    .map_err(|e| db_error("find_by_payment_code", e))?;

    row.map(OrderRow::into_snapshot).transpose()
  }

  #[instrument(name = "MySqlOrderStore::transition_from_pending", skip(self))]
  async fn transition_from_pending(
    &self,
    payment_code: &str,
    target: OrderStatus,
    paid_at: Option<DateTime<Utc>>,
  ) -> VnpayResult<bool> {
    let updated = sqlx::query(
      "UPDATE orders SET status = ?, paymentTime = COALESCE(?, paymentTime) \
       WHERE paymentCode = ? AND status = 'pending'",
    )
    .bind(target.as_str())
    .bind(paid_at)
    .bind(payment_code)
    .execute(&self.pool)
    .await
    .map_err(|e| db_error("transition_from_pending", e))?;

    Ok(updated.rows_affected() > 0)
  }
}
