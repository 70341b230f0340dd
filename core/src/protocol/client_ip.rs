// core/src/protocol/client_ip.rs

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// What the gateway receives when nothing usable was supplied.
pub const FALLBACK_CLIENT_IP: Ipv4Addr = Ipv4Addr::LOCALHOST;

/// Reduces a forwarded-for header value or peer address to what `vnp_IpAddr` expects.
///
/// Takes the first comma-separated entry, accepts a trailing port, maps `::1` to
/// `127.0.0.1` and IPv4-mapped IPv6 to its IPv4 form.
pub fn normalize_client_ip(raw: &str) -> String {
  let candidate = raw.split(',').next().unwrap_or_default().trim();
  match parse_ip(candidate) {
    Some(IpAddr::V4(v4)) => v4.to_string(),
    Some(IpAddr::V6(v6)) if v6.is_loopback() => FALLBACK_CLIENT_IP.to_string(),
    Some(IpAddr::V6(v6)) => match v6.to_ipv4_mapped() {
      Some(v4) => v4.to_string(),
      None => v6.to_string(),
    },
    None => FALLBACK_CLIENT_IP.to_string(),
  }
}

fn parse_ip(candidate: &str) -> Option<IpAddr> {
  candidate
    .parse::<IpAddr>()
    .ok()
    .or_else(|| candidate.parse::<SocketAddr>().ok().map(|addr| addr.ip()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn loopback_and_mapped_forms_become_ipv4() {
    assert_eq!(normalize_client_ip("::1"), "127.0.0.1");
    assert_eq!(normalize_client_ip("::ffff:203.0.113.9"), "203.0.113.9");
    assert_eq!(normalize_client_ip("[::ffff:10.0.0.4]:51234"), "10.0.0.4");
  }

  #[test]
  fn forwarded_chain_uses_first_hop() {
    assert_eq!(normalize_client_ip("198.51.100.7, 10.0.0.1"), "198.51.100.7");
    assert_eq!(normalize_client_ip("  198.51.100.7:8443 "), "198.51.100.7");
  }

  #[test]
  fn public_ipv6_passes_through() {
    assert_eq!(normalize_client_ip("2001:db8::1"), "2001:db8::1");
  }

  #[test]
  fn unusable_input_falls_back_to_loopback() {
    assert_eq!(normalize_client_ip(""), "127.0.0.1");
    assert_eq!(normalize_client_ip("unknown"), "127.0.0.1");
  }
}
