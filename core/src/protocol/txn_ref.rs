// core/src/protocol/txn_ref.rs

use super::gateway_offset;
use chrono::{DateTime, Utc};
use rand::Rng;

/// Upper bound the gateway accepts for `vnp_TxnRef`.
pub const TXN_REF_MAX_LEN: usize = 34;
const RANDOM_DIGITS: u32 = 6;

/// `yyyyMMddHHmmssSSS` on the gateway clock followed by six random digits.
///
/// 23 ASCII digits. Two checkouts collide only when they land in the same
/// millisecond and draw the same suffix.
pub fn generate_txn_ref(now: DateTime<Utc>) -> String {
  let stamp = now.with_timezone(&gateway_offset()).format("%Y%m%d%H%M%S%3f");
  let suffix = rand::thread_rng().gen_range(0..10u32.pow(RANDOM_DIGITS));
  format!("{}{:06}", stamp, suffix)
}
