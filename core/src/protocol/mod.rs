// core/src/protocol/mod.rs

//! Wire-level pieces of the VNPAY 2.1.0 redirect protocol: field names,
//! canonical encoding, signing and the small value formats the gateway expects.

pub mod amount;
pub mod canonical;
pub mod client_ip;
pub mod signer;
pub mod txn_ref;

use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};

pub const VERSION: &str = "2.1.0";
pub const COMMAND_PAY: &str = "pay";

pub const FIELD_VERSION: &str = "vnp_Version";
pub const FIELD_COMMAND: &str = "vnp_Command";
pub const FIELD_TMN_CODE: &str = "vnp_TmnCode";
pub const FIELD_AMOUNT: &str = "vnp_Amount";
pub const FIELD_CURR_CODE: &str = "vnp_CurrCode";
pub const FIELD_TXN_REF: &str = "vnp_TxnRef";
pub const FIELD_ORDER_INFO: &str = "vnp_OrderInfo";
pub const FIELD_ORDER_TYPE: &str = "vnp_OrderType";
pub const FIELD_LOCALE: &str = "vnp_Locale";
pub const FIELD_RETURN_URL: &str = "vnp_ReturnUrl";
pub const FIELD_IP_ADDR: &str = "vnp_IpAddr";
pub const FIELD_CREATE_DATE: &str = "vnp_CreateDate";
pub const FIELD_RESPONSE_CODE: &str = "vnp_ResponseCode";
pub const FIELD_TRANSACTION_STATUS: &str = "vnp_TransactionStatus";
pub const FIELD_SECURE_HASH: &str = "vnp_SecureHash";
pub const FIELD_SECURE_HASH_TYPE: &str = "vnp_SecureHashType";
pub const FIELD_HASH_TYPE: &str = "vnp_HashType";

/// Fields that carry the signature itself and never take part in it.
pub const HASH_FIELDS: [&str; 3] = [FIELD_SECURE_HASH, FIELD_SECURE_HASH_TYPE, FIELD_HASH_TYPE];

/// Response/transaction-status value the gateway uses for a settled payment.
pub const GATEWAY_SUCCESS: &str = "00";

/// The gateway runs on Indochina Time.
pub const GATEWAY_UTC_OFFSET_SECS: i32 = 7 * 3600;

pub fn gateway_offset() -> FixedOffset {
  FixedOffset::east_opt(GATEWAY_UTC_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// `yyyyMMddHHmmss` on the gateway clock, as used by `vnp_CreateDate`.
pub fn format_gateway_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String {
  at.with_timezone(&gateway_offset()).format("%Y%m%d%H%M%S").to_string()
}

pub fn is_hash_field(name: &str) -> bool {
  HASH_FIELDS.contains(&name)
}
