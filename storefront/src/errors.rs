// storefront/src/errors.rs

use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;
use vnpay::VnpayError;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Conflict: {0}")]
  Conflict(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Payment Processing Error: {source}")]
  Payment {
    #[source]
    source: VnpayError,
  },
}

impl From<VnpayError> for AppError {
  fn from(err: VnpayError) -> Self {
    match err {
      VnpayError::InvalidAmount { .. } | VnpayError::MissingOrderCode => AppError::Validation(err.to_string()),
      VnpayError::OrderNotFound { .. } => AppError::NotFound(err.to_string()),
      VnpayError::OrderNotPending { .. } => AppError::Conflict(err.to_string()),
      VnpayError::Config(m) => AppError::Config(m),
      other => AppError::Payment { source: other },
    }
  }
}

impl ResponseError for AppError {
  fn error_response(&self) -> HttpResponse {
    match self {
      AppError::Validation(m) => {
        tracing::warn!(application_error = %self, "Rejecting request");
        HttpResponse::BadRequest().json(json!({"error": m}))
      }
      AppError::NotFound(m) => {
        tracing::warn!(application_error = %self, "Rejecting request");
        HttpResponse::NotFound().json(json!({"error": m}))
      }
      AppError::Conflict(m) => {
        tracing::warn!(application_error = %self, "Rejecting request");
        HttpResponse::Conflict().json(json!({"error": m}))
      }
      AppError::Config(m) => {
        tracing::error!(application_error = %self, "Responding with error");
        HttpResponse::InternalServerError().json(json!({"error": "Configuration issue", "detail": m}))
      }
      AppError::Sqlx(_) => {
        tracing::error!(application_error = %self, "Responding with error");
        HttpResponse::InternalServerError().json(json!({"error": "Database operation failed"}))
      }
      AppError::Payment { source } => {
        tracing::error!(application_error = %self, retryable = source.is_persistence(), "Responding with error");
        HttpResponse::InternalServerError().json(json!({"error": "Could not create payment, please try again"}))
      }
    }
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
