// storefront/src/state.rs

use std::sync::Arc;
use vnpay::{GatewayConfig, NotificationVerifier, OrderStore, PaymentUrlBuilder, VnpayResult};

#[derive(Clone)]
pub struct AppState {
  pub payments: Arc<PaymentUrlBuilder>,
  pub ipn: Arc<NotificationVerifier>,
}

impl AppState {
  pub fn new(gateway: GatewayConfig, store: Arc<dyn OrderStore>) -> VnpayResult<Self> {
    let gateway = Arc::new(gateway);
    Ok(Self {
      payments: Arc::new(PaymentUrlBuilder::new(gateway.clone(), store.clone())?),
      ipn: Arc::new(NotificationVerifier::new(gateway, store)?),
    })
  }
}
