// core/src/verifier/mod.rs

//! Gateway callback handling.
//!
//! [`NotificationVerifier::handle_ipn`] reconciles an IPN against the order
//! store as a linear run of named steps:
//!
//! 1. `verify_secure_hash`: recompute the signature over the raw fields (`97` on mismatch).
//! 2. `load_order`: find the order by transaction ref (`01` when absent).
//! 3. `check_amount`: compare the stored total with the reported amount (`04`).
//! 4. `check_pending`: refuse orders already settled (`02`).
//! 5. `apply_outcome`: conditional `pending -> approved | cancelled` write, then `00`.
//!
//! Any error raised by a step is answered with `99` and leaves the order untouched.
//! [`NotificationVerifier::verify_return`] only checks the signature of the
//! browser redirect and never writes.

pub mod context;
pub mod steps;

use crate::config::GatewayConfig;
use crate::error::VnpayResult;
use crate::notification::{IpnCode, IpnResponse, NotificationPayload};
use crate::pipeline::{ContextData, Pipeline, PipelineResult};
use crate::protocol::signer::HmacSigner;
use crate::store::{OrderStatus, OrderStore};
use context::IpnContext;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Shared by every step handler.
pub struct VerifierDeps {
  pub(crate) signer: HmacSigner,
  pub(crate) store: Arc<dyn OrderStore>,
  pub(crate) store_timeout: Duration,
}

/// Result of one IPN run: what the gateway is told, and what (if anything) changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpnOutcome {
  pub code: IpnCode,
  pub transitioned_to: Option<OrderStatus>,
}

impl IpnOutcome {
  pub fn response(&self) -> IpnResponse {
    IpnResponse::from(self.code)
  }
}

/// Read-only report for the return URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnVerification {
  pub signature_valid: bool,
  pub transaction_ref: Option<String>,
  pub response_code: Option<String>,
  pub transaction_status: Option<String>,
  /// True only when the signature is valid and the gateway reports success.
  pub paid: bool,
}

pub struct NotificationVerifier {
  deps: Arc<VerifierDeps>,
  pipeline: Pipeline<IpnContext>,
}

impl NotificationVerifier {
  pub fn new(config: Arc<GatewayConfig>, store: Arc<dyn OrderStore>) -> VnpayResult<Self> {
    config.validate()?;
    let deps = Arc::new(VerifierDeps {
      signer: HmacSigner::new(&config.hash_secret)?,
      store,
      store_timeout: config.store_timeout,
    });
    let pipeline = build_ipn_pipeline(&deps);
    Ok(Self { deps, pipeline })
  }

  pub fn step_names(&self) -> Vec<&str> {
    self.pipeline.step_names()
  }

  /// Reconciles one IPN and returns the acknowledgement body. Never fails.
  pub async fn handle_ipn(&self, payload: NotificationPayload) -> IpnResponse {
    self.process_ipn(payload).await.response()
  }

  #[instrument(
    name = "NotificationVerifier::process_ipn",
    skip_all,
    fields(transaction_ref = payload.transaction_ref().unwrap_or(""))
  )]
  pub async fn process_ipn(&self, payload: NotificationPayload) -> IpnOutcome {
    let ctx = ContextData::new(IpnContext::new(payload));

    match self.pipeline.run(ctx.clone()).await {
      Ok(result) => {
        let guard = ctx.read();
        let code = guard.outcome.unwrap_or_else(|| {
          error!(?result, "Notification run ended without an outcome.");
          IpnCode::UnknownError
        });
        debug!(rsp_code = code.code(), "Notification processed.");
        IpnOutcome {
          code,
          transitioned_to: guard.transitioned_to,
        }
      }
      Err(e) => {
        error!(error = %e, "Notification processing failed.");
        IpnOutcome {
          code: IpnCode::UnknownError,
          transitioned_to: None,
        }
      }
    }
  }

  /// Checks the signature of the parameters the browser brings back. Never touches the store.
  pub fn verify_return(&self, payload: &NotificationPayload) -> ReturnVerification {
    let signature_valid = payload
      .secure_hash()
      .is_some_and(|supplied| self.deps.signer.verify(&payload.canonical_query(), supplied));
    let report = payload.report();
    ReturnVerification {
      signature_valid,
      paid: signature_valid && report.is_paid(),
      transaction_ref: report.transaction_ref,
      response_code: report.response_code,
      transaction_status: report.transaction_status,
    }
  }
}

fn build_ipn_pipeline(deps: &Arc<VerifierDeps>) -> Pipeline<IpnContext> {
  let mut p = Pipeline::<IpnContext>::new(&[
    (steps::VERIFY_SECURE_HASH, false),
    (steps::LOAD_ORDER, false),
    (steps::CHECK_AMOUNT, false),
    (steps::CHECK_PENDING, false),
    (steps::APPLY_OUTCOME, false),
  ]);

  let d = deps.clone();
  p.on_root(steps::VERIFY_SECURE_HASH, move |ctx| steps::verify_secure_hash(ctx, d.clone()));
  let d = deps.clone();
  p.on_root(steps::LOAD_ORDER, move |ctx| steps::load_order(ctx, d.clone()));
  let d = deps.clone();
  p.on_root(steps::CHECK_AMOUNT, move |ctx| steps::check_amount(ctx, d.clone()));
  let d = deps.clone();
  p.on_root(steps::CHECK_PENDING, move |ctx| steps::check_pending(ctx, d.clone()));
  let d = deps.clone();
  p.on_root(steps::APPLY_OUTCOME, move |ctx| steps::apply_outcome(ctx, d.clone()));

  p
}
