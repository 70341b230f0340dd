// core/src/verifier/context.rs

use crate::notification::{GatewayReport, IpnCode, NotificationPayload};
use crate::store::{OrderSnapshot, OrderStatus};

/// Per-notification state carried through the verification steps.
#[derive(Debug, Clone)]
pub struct IpnContext {
  pub payload: NotificationPayload,
  /// Set once the signature checked out.
  pub report: Option<GatewayReport>,
  pub order: Option<OrderSnapshot>,
  /// Final acknowledgement code. A run that ends without one is answered with `99`.
  pub outcome: Option<IpnCode>,
  /// The status this run moved the order to, if it won the transition.
  pub transitioned_to: Option<OrderStatus>,
}

impl IpnContext {
  pub fn new(payload: NotificationPayload) -> Self {
    Self {
      payload,
      report: None,
      order: None,
      outcome: None,
      transitioned_to: None,
    }
  }

  pub fn transaction_ref(&self) -> Option<String> {
    self.payload.transaction_ref().map(str::to_string)
  }
}
