use agencydb::{AgencyStoreError, Decimal};

#[test]
fn test_parse_and_display_roundtrip() {
    let cases = ["150.00", "0.05", "1234.50", "-12.34", "0.00"];
    for case in cases {
        let value: Decimal = case.parse().expect("parse");
        assert_eq!(value.to_string(), case);
    }
}

#[test]
fn test_parse_without_fraction() {
    let value: Decimal = "150".parse().expect("parse");
    assert_eq!(value, Decimal::from_hundredths(15_000));
    assert_eq!(value.to_string(), "150.00");
}

#[test]
fn test_parse_single_fractional_digit() {
    let value: Decimal = "150.5".parse().expect("parse");
    assert_eq!(value, Decimal::from_hundredths(15_050));
}

#[test]
fn test_parse_rejects_excess_precision() {
    let err = "1.005".parse::<Decimal>().expect_err("three digits");
    match err {
        AgencyStoreError::InvalidInput(_) => {}
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_parse_rejects_garbage() {
    assert!("".parse::<Decimal>().is_err());
    assert!("abc".parse::<Decimal>().is_err());
    assert!("1.2.3".parse::<Decimal>().is_err());
}

#[test]
fn test_ordering_is_exact() {
    let low = Decimal::from_hundredths(14_999);
    let mid = Decimal::from_hundredths(15_000);
    let high = Decimal::from_hundredths(15_001);
    assert!(low < mid);
    assert!(mid < high);
    assert!(!mid.is_negative());
    assert!(Decimal::from_hundredths(-1).is_negative());
}
