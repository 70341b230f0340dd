// storefront/src/db/mod.rs

pub mod order_repo;

pub use order_repo::MySqlOrderStore;

use crate::config::AppConfig;
use crate::errors::Result;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::time::Duration;

pub async fn connect(config: &AppConfig) -> Result<MySqlPool> {
  let pool = MySqlPoolOptions::new()
    .max_connections(config.database_max_connections)
    .acquire_timeout(Duration::from_secs(5))
    .connect(&config.database_url)
    .await?;
  Ok(pool)
}
