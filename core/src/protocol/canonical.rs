// core/src/protocol/canonical.rs

//! Deterministic `key=value&...` rendering of a field set, the input of every signature.

use std::borrow::Cow;

/// How values are escaped while rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueEncoding {
  /// Percent-encoding with `+` standing for a space. Outbound signing and the redirect URL.
  Form,
  /// Values exactly as received after transport decoding. Inbound verification.
  Raw,
}

/// Renders `fields` sorted byte-wise by name and joined as `k1=v1&k2=v2`.
///
/// The sort is stable, so repeated names keep their relative order. Empty values
/// are kept as `name=`. Hash fields must already be stripped by the caller.
pub fn canonical_query<I, K, V>(fields: I, encoding: ValueEncoding) -> String
where
  I: IntoIterator<Item = (K, V)>,
  K: AsRef<str>,
  V: AsRef<str>,
{
  let mut pairs: Vec<(K, V)> = fields.into_iter().collect();
  pairs.sort_by(|a, b| a.0.as_ref().as_bytes().cmp(b.0.as_ref().as_bytes()));

  let mut out = String::new();
  for (idx, (name, value)) in pairs.iter().enumerate() {
    if idx > 0 {
      out.push('&');
    }
    out.push_str(&encode_component(name.as_ref(), encoding));
    out.push('=');
    out.push_str(&encode_component(value.as_ref(), encoding));
  }
  out
}

pub fn encode_component(value: &str, encoding: ValueEncoding) -> Cow<'_, str> {
  match encoding {
    ValueEncoding::Raw => Cow::Borrowed(value),
    ValueEncoding::Form => form_encode(value),
  }
}

/// Escapes `urlencoding` applies that the gateway's reference encoder leaves literal.
const KEPT_LITERAL: [(&str, &str); 5] = [("%21", "!"), ("%27", "'"), ("%28", "("), ("%29", ")"), ("%2A", "*")];

/// Percent-encodes everything outside `A-Z a-z 0-9 - _ . ! ~ * ' ( )` and writes spaces as `+`.
pub fn form_encode(value: &str) -> Cow<'_, str> {
  let encoded = urlencoding::encode(value);
  if !encoded.contains('%') {
    return encoded;
  }
  let mut out = encoded.replace("%20", "+");
  for (escape, literal) in KEPT_LITERAL {
    if out.contains(escape) {
      out = out.replace(escape, literal);
    }
  }
  Cow::Owned(out)
}
