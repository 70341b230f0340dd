// storefront/src/models/order.rs

use rust_decimal::Decimal;
use sqlx::FromRow;
use vnpay::{OrderSnapshot, OrderStatus, VnpayResult};

/// `orders.paymentMethod` value for gateway checkouts.
pub const PAYMENT_METHOD_VNPAY: &str = "vnpay";

/// The columns of `orders` the payment flow reads.
#[derive(Debug, Clone, FromRow)]
pub struct OrderRow {
  pub code: String,
  #[sqlx(rename = "paymentCode")]
  pub payment_code: Option<String>,
  pub status: String,
  #[sqlx(rename = "totalAmount")]
  pub total_amount: Decimal,
}

impl OrderRow {
  pub fn into_snapshot(self) -> VnpayResult<OrderSnapshot> {
    Ok(OrderSnapshot {
      status: self.status.parse::<OrderStatus>()?,
      order_code: self.code,
      payment_code: self.payment_code.unwrap_or_default(),
      total_amount: self.total_amount,
    })
  }
}
