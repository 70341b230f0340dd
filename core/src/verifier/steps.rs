// core/src/verifier/steps.rs

//! The five verification steps. Each one either continues or settles the
//! acknowledgement code and stops the run.

use super::context::IpnContext;
use super::VerifierDeps;
use crate::error::VnpayResult;
use crate::notification::IpnCode;
use crate::pipeline::{ContextData, PipelineControl};
use crate::protocol::amount::from_minor_units;
use crate::store::{with_store_timeout, OrderStatus};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

pub const VERIFY_SECURE_HASH: &str = "verify_secure_hash";
pub const LOAD_ORDER: &str = "load_order";
pub const CHECK_AMOUNT: &str = "check_amount";
pub const CHECK_PENDING: &str = "check_pending";
pub const APPLY_OUTCOME: &str = "apply_outcome";

fn settle(ctx: &ContextData<IpnContext>, code: IpnCode) -> VnpayResult<PipelineControl> {
  ctx.write().outcome = Some(code);
  Ok(PipelineControl::Stop)
}

pub async fn verify_secure_hash(ctx: ContextData<IpnContext>, deps: Arc<VerifierDeps>) -> VnpayResult<PipelineControl> {
  let (valid, report, txn_ref) = {
    let guard = ctx.read();
    let valid = match guard.payload.secure_hash() {
      Some(supplied) => deps.signer.verify(&guard.payload.canonical_query(), supplied),
      None => false,
    };
    (valid, guard.payload.report(), guard.transaction_ref())
  };

  if !valid {
    warn!(transaction_ref = ?txn_ref, "Notification signature mismatch.");
    return settle(&ctx, IpnCode::InvalidChecksum);
  }

  ctx.write().report = Some(report);
  Ok(PipelineControl::Continue)
}

pub async fn load_order(ctx: ContextData<IpnContext>, deps: Arc<VerifierDeps>) -> VnpayResult<PipelineControl> {
  let txn_ref = ctx.read().transaction_ref();
  let Some(txn_ref) = txn_ref else {
    warn!("Signed notification carries no transaction ref.");
    return settle(&ctx, IpnCode::OrderNotFound);
  };

  let found = with_store_timeout(
    "find_by_payment_code",
    deps.store_timeout,
    deps.store.find_by_payment_code(&txn_ref),
  )
  .await?;

  match found {
    Some(order) => {
      ctx.write().order = Some(order);
      Ok(PipelineControl::Continue)
    }
    None => {
      warn!(transaction_ref = %txn_ref, "No order for notification.");
      settle(&ctx, IpnCode::OrderNotFound)
    }
  }
}

pub async fn check_amount(ctx: ContextData<IpnContext>, _deps: Arc<VerifierDeps>) -> VnpayResult<PipelineControl> {
  let (reported, expected, order_code) = {
    let guard = ctx.read();
    let reported = guard.report.as_ref().and_then(|report| report.amount_minor);
    match guard.order.as_ref() {
      Some(order) => (reported, order.total_amount, order.order_code.clone()),
      None => return Ok(PipelineControl::Continue),
    }
  };

  let matches = reported.map(from_minor_units) == Some(expected);
  if !matches {
    warn!(%order_code, ?reported, %expected, "Notification amount does not match order total.");
    return settle(&ctx, IpnCode::InvalidAmount);
  }
  Ok(PipelineControl::Continue)
}

pub async fn check_pending(ctx: ContextData<IpnContext>, _deps: Arc<VerifierDeps>) -> VnpayResult<PipelineControl> {
  let status = ctx.read().order.as_ref().map(|order| (order.order_code.clone(), order.status));
  match status {
    Some((order_code, status)) if status != OrderStatus::Pending => {
      warn!(%order_code, %status, "Notification for already settled order.");
      settle(&ctx, IpnCode::AlreadyConfirmed)
    }
    _ => Ok(PipelineControl::Continue),
  }
}

pub async fn apply_outcome(ctx: ContextData<IpnContext>, deps: Arc<VerifierDeps>) -> VnpayResult<PipelineControl> {
  let (txn_ref, paid) = {
    let guard = ctx.read();
    (
      guard.transaction_ref().unwrap_or_default(),
      guard.report.as_ref().is_some_and(|report| report.is_paid()),
    )
  };
  let (target, paid_at) = if paid {
    (OrderStatus::Approved, Some(Utc::now()))
  } else {
    (OrderStatus::Cancelled, None)
  };

  let won = with_store_timeout(
    "transition_from_pending",
    deps.store_timeout,
    deps.store.transition_from_pending(&txn_ref, target, paid_at),
  )
  .await?;

  if !won {
    warn!(transaction_ref = %txn_ref, "Order left pending concurrently; treating as already confirmed.");
    return settle(&ctx, IpnCode::AlreadyConfirmed);
  }

  info!(transaction_ref = %txn_ref, status = %target, "Order settled from notification.");
  let mut guard = ctx.write();
  guard.transitioned_to = Some(target);
  guard.outcome = Some(IpnCode::Confirmed);
  Ok(PipelineControl::Continue)
}
