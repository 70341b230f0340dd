// storefront/src/web/handlers/ipn_handlers.rs

use actix_web::{web, HttpRequest, HttpResponse};
use tracing::{info, instrument};

use super::payload_from_query;
use crate::state::AppState;

/// Always HTTP 200; the gateway reads the outcome from `RspCode`.
#[instrument(name = "handler::vnpay_ipn", skip_all)]
pub async fn vnpay_ipn_handler(app_state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
  let payload = payload_from_query(req.query_string());
  let response = app_state.ipn.handle_ipn(payload).await;
  info!(rsp_code = %response.rsp_code, "IPN acknowledged.");
  HttpResponse::Ok().json(response)
}

/// Tells the shop frontend what the gateway reported. Order state is left to the IPN.
#[instrument(name = "handler::vnpay_return", skip_all)]
pub async fn vnpay_return_handler(app_state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
  let payload = payload_from_query(req.query_string());
  HttpResponse::Ok().json(app_state.ipn.verify_return(&payload))
}
