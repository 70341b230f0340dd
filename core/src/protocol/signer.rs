// core/src/protocol/signer.rs

use crate::error::{VnpayError, VnpayResult};
use hmac::{Hmac, Mac};
use sha2::Sha512;

type HmacSha512 = Hmac<Sha512>;

/// HMAC-SHA512 keyed with the merchant hash secret.
///
/// The key is fixed at construction, so outbound signing and inbound
/// verification always share byte-identical key material.
#[derive(Clone)]
pub struct HmacSigner {
  keyed: HmacSha512,
}

impl HmacSigner {
  pub fn new(secret: &str) -> VnpayResult<Self> {
    let keyed = HmacSha512::new_from_slice(secret.as_bytes())
      .map_err(|e| VnpayError::Config(format!("HMAC key rejected: {}", e)))?;
    Ok(Self { keyed })
  }

  /// Lowercase hex digest (128 chars) of `canonical` taken as UTF-8 bytes.
  pub fn sign(&self, canonical: &str) -> String {
    let mut mac = self.keyed.clone();
    mac.update(canonical.as_bytes());
    hex::encode(mac.finalize().into_bytes())
  }

  /// Constant-time check of a hex signature against `canonical`.
  ///
  /// Hex case is ignored. Anything that is not valid hex of the right length fails.
  pub fn verify(&self, canonical: &str, supplied_hex: &str) -> bool {
    let Ok(supplied) = hex::decode(supplied_hex) else {
      return false;
    };
    let mut mac = self.keyed.clone();
    mac.update(canonical.as_bytes());
    mac.verify_slice(&supplied).is_ok()
  }
}

impl std::fmt::Debug for HmacSigner {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("HmacSigner").field("algorithm", &"HMAC-SHA512").finish_non_exhaustive()
  }
}
