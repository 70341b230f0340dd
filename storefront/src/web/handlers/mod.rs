// storefront/src/web/handlers/mod.rs

pub mod ipn_handlers;
pub mod payment_handlers;

use actix_web::web;
use vnpay::NotificationPayload;

/// Decoded query pairs in arrival order. An undecodable query yields an empty
/// payload, which then fails signature verification.
pub(crate) fn payload_from_query(query: &str) -> NotificationPayload {
  match web::Query::<Vec<(String, String)>>::from_query(query) {
    Ok(pairs) => NotificationPayload::from_pairs(pairs.into_inner()),
    Err(e) => {
      tracing::warn!(error = %e, "Callback query could not be decoded.");
      NotificationPayload::default()
    }
  }
}
