// storefront/src/models/mod.rs

//! Contains data structures representing database entities.

pub mod order;

pub use order::{OrderRow, PAYMENT_METHOD_VNPAY};
