// storefront/src/web/handlers/payment_handlers.rs

use actix_web::{web, HttpRequest, HttpResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use vnpay::CreatePaymentUrl;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentUrlBody {
  /// Major units, as a JSON number or string.
  pub amount: Decimal,
  pub shop_order_code: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentUrlResponse {
  pub order_url: String,
  /// The gateway transaction ref now stored on the order.
  pub order_code: String,
}

#[instrument(
  name = "handler::vnpay_create_url",
  skip(app_state, req, body),
  fields(shop_order_code = %body.shop_order_code)
)]
pub async fn create_payment_url_handler(
  app_state: web::Data<AppState>,
  req: HttpRequest,
  body: web::Json<CreatePaymentUrlBody>,
) -> Result<HttpResponse, AppError> {
  let body = body.into_inner();
  // First X-Forwarded-For / Forwarded entry, else the socket peer.
  let client_ip = req
    .connection_info()
    .realip_remote_addr()
    .unwrap_or_default()
    .to_string();

  let url = app_state
    .payments
    .create_payment_url(CreatePaymentUrl {
      amount: body.amount,
      order_code: body.shop_order_code,
      client_ip,
    })
    .await?;

  info!(transaction_ref = %url.transaction_ref, "Payment URL issued.");
  Ok(HttpResponse::Ok().json(CreatePaymentUrlResponse {
    order_url: url.redirect_url,
    order_code: url.transaction_ref,
  }))
}
