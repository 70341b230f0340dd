// tests/amount_fidelity_tests.rs
mod common;

use common::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serial_test::serial;
use std::sync::Arc;
use vnpay::protocol::amount::{from_minor_units, parse_minor_units, to_minor_units};
use vnpay::{CreatePaymentUrl, IpnCode, MemoryOrderStore, NotificationVerifier, OrderStatus, PaymentUrlBuilder};

fn sample_amounts() -> Vec<Decimal> {
  let mut samples = vec![
    dec!(150000),
    dec!(199999),
    dec!(1),
    dec!(5000),
    dec!(10000),
    dec!(99999),
    dec!(100001),
    dec!(123456),
    dec!(999999),
    dec!(1000000),
    dec!(2500000),
    dec!(49999999),
    dec!(10.5),
    dec!(0.01),
    dec!(1234.56),
    dec!(99999.99),
  ];
  // Non-round values spread over several magnitudes.
  samples.extend((1..=40_i64).map(|i| Decimal::from(i * i * 7919 + 13 * i + 1)));
  samples
}

#[test]
fn test_150000_maps_to_15000000_and_back() {
  assert_eq!(to_minor_units(dec!(150000)).unwrap(), 15_000_000);
  assert_eq!(from_minor_units(15_000_000), dec!(150000));
}

#[test]
fn test_conversion_round_trips_exactly_for_all_samples() {
  let samples = sample_amounts();
  assert!(samples.len() >= 50);

  for amount in samples {
    let minor = to_minor_units(amount).unwrap();
    assert_eq!(Decimal::from(minor), amount * dec!(100), "minor units of {amount}");
    assert_eq!(from_minor_units(minor), amount, "reverse of {amount}");
    assert_eq!(parse_minor_units(&minor.to_string()), Some(minor));
  }
}

#[test]
fn test_sub_minor_precision_rounds_half_away_from_zero() {
  assert_eq!(to_minor_units(dec!(10.005)).unwrap(), 1001);
  assert_eq!(to_minor_units(dec!(10.004)).unwrap(), 1000);
  assert_eq!(to_minor_units(dec!(0.005)).unwrap(), 1);
  assert!(to_minor_units(dec!(0.004)).is_err());
}

#[test]
fn test_stored_scale_does_not_affect_comparison() {
  // DECIMAL(12,2) columns come back with scale 2.
  assert_eq!(from_minor_units(19_999_900), dec!(199999.00));
}

#[tokio::test]
#[serial]
async fn test_amounts_survive_url_and_notification_round_trip() {
  setup_tracing();
  let store = MemoryOrderStore::new();
  let config = Arc::new(test_config());
  let builder = PaymentUrlBuilder::new(config.clone(), Arc::new(store.clone())).unwrap();
  let verifier = NotificationVerifier::new(config, Arc::new(store.clone())).unwrap();

  for (idx, amount) in sample_amounts().into_iter().enumerate() {
    let order_code = format!("AMT{idx}");
    store.insert_pending(&order_code, amount);

    let url = builder
      .create_payment_url(CreatePaymentUrl {
        amount,
        order_code: order_code.clone(),
        client_ip: "127.0.0.1".to_string(),
      })
      .await
      .unwrap();
    let sent_minor: i64 = url
      .redirect_url
      .split(['?', '&'])
      .find_map(|pair| pair.strip_prefix("vnp_Amount="))
      .unwrap()
      .parse()
      .unwrap();
    assert_eq!(sent_minor, to_minor_units(amount).unwrap());

    let payload = signed_payload(ipn_fields(&url.transaction_ref, sent_minor, "00", "00"));
    let outcome = verifier.process_ipn(payload).await;
    assert_eq!(outcome.code, IpnCode::Confirmed, "amount {amount}");
    assert_eq!(store.status_of(&order_code), Some(OrderStatus::Approved));
  }
}
