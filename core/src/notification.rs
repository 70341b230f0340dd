// core/src/notification.rs

//! The inbound half of the protocol: gateway callbacks and the acknowledgement sent back.

use crate::protocol::amount::parse_minor_units;
use crate::protocol::canonical::{canonical_query, ValueEncoding};
use crate::protocol::{self, is_hash_field};
use serde::{Deserialize, Serialize};

/// Query parameters of an IPN or return-URL callback. Untrusted until verified.
///
/// Keeps every non-hash parameter exactly as received, because the signature
/// covers whatever the gateway chose to send, not a fixed field list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationPayload {
  signed_fields: Vec<(String, String)>,
  secure_hash: Option<String>,
}

impl NotificationPayload {
  /// Splits decoded query pairs into the signed set and the supplied hash.
  /// `vnp_SecureHashType` and `vnp_HashType` are dropped.
  pub fn from_pairs<I, K, V>(pairs: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
  {
    let mut payload = NotificationPayload::default();
    for (name, value) in pairs {
      let name = name.into();
      if name == protocol::FIELD_SECURE_HASH {
        payload.secure_hash = Some(value.into());
      } else if !is_hash_field(&name) {
        payload.signed_fields.push((name, value.into()));
      }
    }
    payload
  }

  pub fn secure_hash(&self) -> Option<&str> {
    self.secure_hash.as_deref()
  }

  pub fn signed_fields(&self) -> &[(String, String)] {
    &self.signed_fields
  }

  /// First value for `name`, if present.
  pub fn get(&self, name: &str) -> Option<&str> {
    self
      .signed_fields
      .iter()
      .find(|(field, _)| field == name)
      .map(|(_, value)| value.as_str())
  }

  pub fn transaction_ref(&self) -> Option<&str> {
    self.get(protocol::FIELD_TXN_REF)
  }

  /// Signature input: sorted, values unescaped.
  pub fn canonical_query(&self) -> String {
    canonical_query(
      self.signed_fields.iter().map(|(name, value)| (name.as_str(), value.as_str())),
      ValueEncoding::Raw,
    )
  }

  /// Typed view of the fields the reconciliation acts on. Only meaningful after the signature checked out.
  pub fn report(&self) -> GatewayReport {
    GatewayReport {
      transaction_ref: self.transaction_ref().map(str::to_string),
      amount_minor: self.get(protocol::FIELD_AMOUNT).and_then(parse_minor_units),
      response_code: self.get(protocol::FIELD_RESPONSE_CODE).map(str::to_string),
      transaction_status: self.get(protocol::FIELD_TRANSACTION_STATUS).map(str::to_string),
    }
  }
}

/// What the gateway says happened to a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayReport {
  pub transaction_ref: Option<String>,
  /// `None` when absent or not a plain digit string.
  pub amount_minor: Option<i64>,
  pub response_code: Option<String>,
  pub transaction_status: Option<String>,
}

impl GatewayReport {
  /// Paid only when both the response code and the transaction status are `00`.
  pub fn is_paid(&self) -> bool {
    self.response_code.as_deref() == Some(protocol::GATEWAY_SUCCESS)
      && self.transaction_status.as_deref() == Some(protocol::GATEWAY_SUCCESS)
  }
}

/// Result codes of the IPN acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpnCode {
  /// The notification was durably processed. Says nothing about whether the buyer paid.
  Confirmed,
  OrderNotFound,
  AlreadyConfirmed,
  InvalidAmount,
  InvalidChecksum,
  UnknownError,
}

impl IpnCode {
  pub fn code(&self) -> &'static str {
    match self {
      IpnCode::Confirmed => "00",
      IpnCode::OrderNotFound => "01",
      IpnCode::AlreadyConfirmed => "02",
      IpnCode::InvalidAmount => "04",
      IpnCode::InvalidChecksum => "97",
      IpnCode::UnknownError => "99",
    }
  }

  pub fn message(&self) -> &'static str {
    match self {
      IpnCode::Confirmed => "Success",
      IpnCode::OrderNotFound => "Order not found",
      IpnCode::AlreadyConfirmed => "Order already confirmed",
      IpnCode::InvalidAmount => "Invalid Amount",
      IpnCode::InvalidChecksum => "Invalid Checksum",
      IpnCode::UnknownError => "Unknown error",
    }
  }

  /// Only a processing failure is worth the gateway resending; every other code is final.
  pub fn warrants_retry(&self) -> bool {
    matches!(self, IpnCode::UnknownError)
  }
}

/// Body of every IPN response. Sent with HTTP 200 whatever the code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpnResponse {
  #[serde(rename = "RspCode")]
  pub rsp_code: String,
  #[serde(rename = "Message")]
  pub message: String,
}

impl From<IpnCode> for IpnResponse {
  fn from(code: IpnCode) -> Self {
    IpnResponse {
      rsp_code: code.code().to_string(),
      message: code.message().to_string(),
    }
  }
}
