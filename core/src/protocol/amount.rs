// core/src/protocol/amount.rs

//! Major/minor currency unit conversion. The gateway carries amounts as
//! integers scaled by 100, for VND as well.

use crate::error::{VnpayError, VnpayResult};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

pub const MINOR_UNIT_SCALE: u32 = 2;

/// `amount * 100`, rounded half away from zero.
///
/// Rejects amounts that are not positive, that round to zero minor units or
/// that do not fit an `i64`.
pub fn to_minor_units(amount: Decimal) -> VnpayResult<i64> {
  if amount <= Decimal::ZERO {
    return Err(VnpayError::invalid_amount(format!("{} is not a positive amount", amount)));
  }
  let scaled = amount
    .checked_mul(Decimal::from(100))
    .ok_or_else(|| VnpayError::invalid_amount(format!("{} is too large", amount)))?;
  let minor = scaled
    .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    .to_i64()
    .ok_or_else(|| VnpayError::invalid_amount(format!("{} is too large", amount)))?;
  if minor == 0 {
    return Err(VnpayError::invalid_amount(format!("{} rounds to zero", amount)));
  }
  Ok(minor)
}

/// Exact inverse of [`to_minor_units`] for whole minor units.
pub fn from_minor_units(minor: i64) -> Decimal {
  Decimal::new(minor, MINOR_UNIT_SCALE)
}

/// Parses a `vnp_Amount` value. Only plain ASCII digits are accepted.
pub fn parse_minor_units(raw: &str) -> Option<i64> {
  if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }
  raw.parse().ok()
}
