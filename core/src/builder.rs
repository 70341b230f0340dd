// core/src/builder.rs

//! Checkout side: turns an order into a signed gateway redirect and links the
//! generated transaction ref to the order before the caller sees the URL.

use crate::config::GatewayConfig;
use crate::error::{VnpayError, VnpayResult};
use crate::protocol::amount::to_minor_units;
use crate::protocol::client_ip::normalize_client_ip;
use crate::protocol::signer::HmacSigner;
use crate::protocol::txn_ref::generate_txn_ref;
use crate::request::{PaymentRequest, SignedRequest};
use crate::store::{with_store_timeout, AttachOutcome, OrderStore};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Input to [`PaymentUrlBuilder::create_payment_url`].
#[derive(Debug, Clone)]
pub struct CreatePaymentUrl {
  /// Major units.
  pub amount: Decimal,
  pub order_code: String,
  /// Raw caller address as seen by the web layer; normalised before use.
  pub client_ip: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentUrl {
  pub redirect_url: String,
  pub transaction_ref: String,
}

pub struct PaymentUrlBuilder {
  config: Arc<GatewayConfig>,
  signer: HmacSigner,
  store: Arc<dyn OrderStore>,
}

impl PaymentUrlBuilder {
  pub fn new(config: Arc<GatewayConfig>, store: Arc<dyn OrderStore>) -> VnpayResult<Self> {
    config.validate()?;
    let signer = HmacSigner::new(&config.hash_secret)?;
    Ok(Self { config, signer, store })
  }

  pub fn config(&self) -> &GatewayConfig {
    &self.config
  }

  /// Validates the input and produces the signed request without touching the store.
  pub fn build_signed_request(&self, input: &CreatePaymentUrl, now: DateTime<Utc>) -> VnpayResult<SignedRequest> {
    if input.order_code.trim().is_empty() {
      return Err(VnpayError::MissingOrderCode);
    }
    let amount_minor = to_minor_units(input.amount)?;
    let txn_ref = generate_txn_ref(now);
    let caller_ip = normalize_client_ip(&input.client_ip);

    let request = PaymentRequest::for_order(&self.config, &input.order_code, amount_minor, txn_ref, caller_ip, now);
    Ok(request.sign(&self.signer))
  }

  /// Builds the redirect URL and records its transaction ref on the order.
  ///
  /// No URL is returned unless the ref was stored, so every notification the
  /// gateway sends later can be matched to an order.
  #[instrument(
    name = "PaymentUrlBuilder::create_payment_url",
    skip_all,
    fields(order_code = %input.order_code, amount = %input.amount),
    err(Display)
  )]
  pub async fn create_payment_url(&self, input: CreatePaymentUrl) -> VnpayResult<PaymentUrl> {
    let signed = self.build_signed_request(&input, Utc::now())?;
    let txn_ref = signed.request().transaction_ref.clone();

    let outcome = with_store_timeout(
      "attach_payment_code",
      self.config.store_timeout,
      self.store.attach_payment_code(&input.order_code, &txn_ref),
    )
    .await?;

    match outcome {
      AttachOutcome::Attached => {}
      AttachOutcome::OrderNotFound => {
        warn!(order_code = %input.order_code, "Payment requested for unknown order.");
        return Err(VnpayError::OrderNotFound {
          order_code: input.order_code,
        });
      }
      AttachOutcome::NotPending(status) => {
        warn!(order_code = %input.order_code, %status, "Payment requested for settled order.");
        return Err(VnpayError::OrderNotPending {
          order_code: input.order_code,
        });
      }
    }

    info!(transaction_ref = %txn_ref, "Payment URL created.");
    Ok(PaymentUrl {
      redirect_url: signed.redirect_url(&self.config.payment_url),
      transaction_ref: txn_ref,
    })
  }
}
