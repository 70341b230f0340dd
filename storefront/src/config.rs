// storefront/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;
use vnpay::config::{DEFAULT_LOCALE, DEFAULT_ORDER_TYPE, SANDBOX_PAYMENT_URL};
use vnpay::GatewayConfig;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,
  pub database_max_connections: u32,
  pub gateway: GatewayConfig,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };
    let get_or = |var_name: &str, default: &str| get_env(var_name).unwrap_or_else(|_| default.to_string());

    let server_host = get_or("SERVER_HOST", "127.0.0.1");
    let server_port = get_or("SERVER_PORT", "5000")
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = get_env("DATABASE_URL")?;
    let database_max_connections = get_or("DATABASE_MAX_CONNECTIONS", "10")
      .parse::<u32>()
      .map_err(|e| AppError::Config(format!("Invalid DATABASE_MAX_CONNECTIONS: {}", e)))?;

    let store_timeout_ms = get_or("VNPAY_STORE_TIMEOUT_MS", "3000")
      .parse::<u64>()
      .map_err(|e| AppError::Config(format!("Invalid VNPAY_STORE_TIMEOUT_MS: {}", e)))?;

    let mut gateway = GatewayConfig::new(
      get_env("VNPAY_TMN_CODE")?,
      get_env("VNPAY_HASH_SECRET")?,
      get_env("VNPAY_RETURN_URL")?,
    )
    .with_payment_url(get_or("VNPAY_PAYMENT_URL", SANDBOX_PAYMENT_URL))
    .with_store_timeout(Duration::from_millis(store_timeout_ms));
    if let Ok(ipn_url) = get_env("VNPAY_IPN_URL") {
      gateway = gateway.with_ipn_url(ipn_url);
    }
    gateway.locale = get_or("VNPAY_LOCALE", DEFAULT_LOCALE);
    gateway.order_type = get_or("VNPAY_ORDER_TYPE", DEFAULT_ORDER_TYPE);
    gateway.validate()?;

    // GatewayConfig's Debug output redacts the secret.
    tracing::info!(gateway = ?gateway, "Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      database_url,
      database_max_connections,
      gateway,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}
