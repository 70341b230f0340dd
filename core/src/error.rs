// core/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VnpayError {
  #[error("Invalid payment amount: {reason}")]
  InvalidAmount { reason: String },

  #[error("Order code is required")]
  MissingOrderCode,

  #[error("Order not found: {order_code}")]
  OrderNotFound { order_code: String },

  #[error("Order '{order_code}' is no longer awaiting payment")]
  OrderNotPending { order_code: String },

  #[error("Order store operation '{operation}' failed. Source: {source}")]
  Store {
    operation: &'static str,
    #[source]
    source: AnyhowError,
  },

  #[error("Order store operation '{operation}' timed out after {timeout_ms}ms")]
  StoreTimeout { operation: &'static str, timeout_ms: u128 },

  #[error("Gateway configuration error: {0}")]
  Config(String),

  #[error("Handler missing for non-optional step: {step_name}")]
  HandlerMissing { step_name: String },
}

impl VnpayError {
  pub fn invalid_amount(reason: impl Into<String>) -> Self {
    VnpayError::InvalidAmount { reason: reason.into() }
  }

  pub fn store(operation: &'static str, source: impl Into<AnyhowError>) -> Self {
    VnpayError::Store {
      operation,
      source: source.into(),
    }
  }

  /// True for caller mistakes that must be rejected before anything is signed or written.
  pub fn is_validation(&self) -> bool {
    matches!(self, VnpayError::InvalidAmount { .. } | VnpayError::MissingOrderCode)
  }

  /// True when the order store failed or did not answer in time. The only class worth retrying.
  pub fn is_persistence(&self) -> bool {
    matches!(self, VnpayError::Store { .. } | VnpayError::StoreTimeout { .. })
  }
}

pub type VnpayResult<T, E = VnpayError> = std::result::Result<T, E>;
