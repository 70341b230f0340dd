// core/src/config.rs

use crate::error::{VnpayError, VnpayResult};
use std::time::Duration;

pub const SANDBOX_PAYMENT_URL: &str = "https://sandbox.vnpayment.vn/paymentv2/vpcpay.html";
pub const DEFAULT_LOCALE: &str = "vn";
pub const DEFAULT_ORDER_TYPE: &str = "billpayment";
pub const DEFAULT_CURRENCY: &str = "VND";
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(3);

/// Merchant credentials and endpoints, handed to the builder and the verifier
/// when they are constructed.
#[derive(Clone)]
pub struct GatewayConfig {
  /// `vnp_TmnCode`.
  pub tmn_code: String,
  pub hash_secret: String,
  pub payment_url: String,
  pub return_url: String,
  /// Registered with the gateway out of band; kept here for startup diagnostics.
  pub ipn_url: Option<String>,
  pub locale: String,
  pub order_type: String,
  pub currency: String,
  /// Upper bound on every order-store round trip.
  pub store_timeout: Duration,
}

impl GatewayConfig {
  /// Sandbox endpoint and protocol defaults; credentials and return URL supplied by the caller.
  pub fn new(tmn_code: impl Into<String>, hash_secret: impl Into<String>, return_url: impl Into<String>) -> Self {
    Self {
      tmn_code: tmn_code.into(),
      hash_secret: hash_secret.into(),
      payment_url: SANDBOX_PAYMENT_URL.to_string(),
      return_url: return_url.into(),
      ipn_url: None,
      locale: DEFAULT_LOCALE.to_string(),
      order_type: DEFAULT_ORDER_TYPE.to_string(),
      currency: DEFAULT_CURRENCY.to_string(),
      store_timeout: DEFAULT_STORE_TIMEOUT,
    }
  }

  pub fn with_payment_url(mut self, payment_url: impl Into<String>) -> Self {
    self.payment_url = payment_url.into();
    self
  }

  pub fn with_ipn_url(mut self, ipn_url: impl Into<String>) -> Self {
    self.ipn_url = Some(ipn_url.into());
    self
  }

  pub fn with_store_timeout(mut self, store_timeout: Duration) -> Self {
    self.store_timeout = store_timeout;
    self
  }

  pub fn validate(&self) -> VnpayResult<()> {
    let required = [
      ("tmn_code", &self.tmn_code),
      ("hash_secret", &self.hash_secret),
      ("payment_url", &self.payment_url),
      ("return_url", &self.return_url),
      ("locale", &self.locale),
      ("order_type", &self.order_type),
      ("currency", &self.currency),
    ];
    if let Some((name, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
      return Err(VnpayError::Config(format!("'{}' must not be empty", name)));
    }
    if self.payment_url.contains('?') {
      return Err(VnpayError::Config("payment_url must not carry a query string".to_string()));
    }
    if self.store_timeout.is_zero() {
      return Err(VnpayError::Config("store_timeout must be greater than zero".to_string()));
    }
    Ok(())
  }
}

impl std::fmt::Debug for GatewayConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("GatewayConfig")
      .field("tmn_code", &self.tmn_code)
      .field("hash_secret", &"[REDACTED]")
      .field("payment_url", &self.payment_url)
      .field("return_url", &self.return_url)
      .field("ipn_url", &self.ipn_url)
      .field("locale", &self.locale)
      .field("order_type", &self.order_type)
      .field("currency", &self.currency)
      .field("store_timeout", &self.store_timeout)
      .finish()
  }
}
