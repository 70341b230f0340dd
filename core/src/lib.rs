// src/lib.rs

//! vnpay: VNPAY payment-gateway integration for Rust services.
//!
//! The crate covers both directions of the gateway protocol:
//!  - Canonical, sorted query encoding of the signed field set.
//!  - HMAC-SHA512 signing and constant-time verification.
//!  - Building signed redirect URLs and linking their transaction refs to orders.
//!  - Reconciling IPN callbacks against the order store, idempotently.
//!  - Read-only verification of the browser return URL.
//!
//! Persistence is abstracted behind [`OrderStore`]; [`MemoryOrderStore`] ships
//! for tests and demos.

pub mod builder;
pub mod config;
pub mod error;
pub mod notification;
pub mod pipeline;
pub mod protocol;
pub mod request;
pub mod store;
pub mod verifier;

// --- Re-exports for the Public API ---

pub use crate::builder::{CreatePaymentUrl, PaymentUrl, PaymentUrlBuilder};
pub use crate::config::GatewayConfig;
pub use crate::error::{VnpayError, VnpayResult};
pub use crate::notification::{GatewayReport, IpnCode, IpnResponse, NotificationPayload};
pub use crate::protocol::canonical::{canonical_query, ValueEncoding};
pub use crate::protocol::signer::HmacSigner;
pub use crate::request::{PaymentRequest, SignedRequest};
pub use crate::store::{AttachOutcome, MemoryOrderStore, OrderSnapshot, OrderStatus, OrderStore};
pub use crate::verifier::{IpnOutcome, NotificationVerifier, ReturnVerification};
