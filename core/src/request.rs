// core/src/request.rs

//! The outbound half of the protocol: the field set sent to the gateway and its signed form.

use crate::config::GatewayConfig;
use crate::protocol::canonical::{canonical_query, ValueEncoding};
use crate::protocol::signer::HmacSigner;
use crate::protocol::{self, format_gateway_timestamp};
use chrono::{DateTime, Utc};

/// One payment attempt. Built once per checkout and never mutated after signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
  pub merchant_code: String,
  /// Minor units (amount × 100).
  pub amount: i64,
  pub currency: String,
  pub transaction_ref: String,
  pub order_info: String,
  pub order_type: String,
  pub locale: String,
  pub return_url: String,
  pub caller_ip: String,
  /// Second precision; rendered on the gateway clock.
  pub created_at: DateTime<Utc>,
}

impl PaymentRequest {
  /// Fills the merchant-level fields from `config`.
  pub fn for_order(
    config: &GatewayConfig,
    order_code: &str,
    amount_minor: i64,
    transaction_ref: String,
    caller_ip: String,
    created_at: DateTime<Utc>,
  ) -> Self {
    Self {
      merchant_code: config.tmn_code.clone(),
      amount: amount_minor,
      currency: config.currency.clone(),
      transaction_ref,
      order_info: order_description(order_code),
      order_type: config.order_type.clone(),
      locale: config.locale.clone(),
      return_url: config.return_url.clone(),
      caller_ip,
      created_at,
    }
  }

  /// Every signed field, by protocol name. This list is the signing boundary:
  /// nothing outside it is ever hashed or sent.
  pub fn fields(&self) -> Vec<(&'static str, String)> {
    vec![
      (protocol::FIELD_VERSION, protocol::VERSION.to_string()),
      (protocol::FIELD_COMMAND, protocol::COMMAND_PAY.to_string()),
      (protocol::FIELD_TMN_CODE, self.merchant_code.clone()),
      (protocol::FIELD_AMOUNT, self.amount.to_string()),
      (protocol::FIELD_CURR_CODE, self.currency.clone()),
      (protocol::FIELD_TXN_REF, self.transaction_ref.clone()),
      (protocol::FIELD_ORDER_INFO, self.order_info.clone()),
      (protocol::FIELD_ORDER_TYPE, self.order_type.clone()),
      (protocol::FIELD_LOCALE, self.locale.clone()),
      (protocol::FIELD_RETURN_URL, self.return_url.clone()),
      (protocol::FIELD_IP_ADDR, self.caller_ip.clone()),
      (protocol::FIELD_CREATE_DATE, format_gateway_timestamp(&self.created_at)),
    ]
  }

  /// Sorted, `+`-space encoded query. Both the signature input and the URL query.
  pub fn canonical_query(&self) -> String {
    canonical_query(self.fields(), ValueEncoding::Form)
  }

  pub fn sign(self, signer: &HmacSigner) -> SignedRequest {
    let canonical = self.canonical_query();
    let secure_hash = signer.sign(&canonical);
    SignedRequest {
      request: self,
      canonical,
      secure_hash,
    }
  }
}

pub fn order_description(order_code: &str) -> String {
  format!("Thanh toan don hang: {}", order_code)
}

/// A request together with its signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
  request: PaymentRequest,
  canonical: String,
  secure_hash: String,
}

impl SignedRequest {
  pub fn request(&self) -> &PaymentRequest {
    &self.request
  }

  pub fn secure_hash(&self) -> &str {
    &self.secure_hash
  }

  pub fn canonical_query(&self) -> &str {
    &self.canonical
  }

  /// `<base>?<canonical query>&vnp_SecureHash=<hex>`.
  pub fn redirect_url(&self, payment_url: &str) -> String {
    format!(
      "{}?{}&{}={}",
      payment_url,
      self.canonical,
      protocol::FIELD_SECURE_HASH,
      self.secure_hash
    )
  }
}
