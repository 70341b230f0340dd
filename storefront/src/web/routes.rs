// storefront/src/web/routes.rs

use actix_web::web;

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api")
      .route("/health", web::get().to(health_check_handler))
      .service(
        web::scope("/orders")
          .route(
            "/vnpay_create_url",
            web::post().to(crate::web::handlers::payment_handlers::create_payment_url_handler),
          )
          // Gateway server-to-server callback.
          .route(
            "/vnpay_ipn",
            web::get().to(crate::web::handlers::ipn_handlers::vnpay_ipn_handler),
          )
          // Browser redirect back from the gateway. Read-only.
          .route(
            "/vnpay_return",
            web::get().to(crate::web::handlers::ipn_handlers::vnpay_return_handler),
          ),
      ),
  );
}
