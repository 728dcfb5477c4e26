//! Short-link codec tests

use domain_recipes::error::ShortLinkError;
use domain_recipes::shortlink::{decode, encode};

use proptest::prelude::*;

#[test]
fn test_encode_known_values() {
    assert_eq!(encode(1), "1");
    assert_eq!(encode(10), "a");
    assert_eq!(encode(255), "ff");
    assert_eq!(encode(4096), "1000");
}

#[test]
fn test_decode_known_values() {
    assert_eq!(decode("1"), Ok(1));
    assert_eq!(decode("a"), Ok(10));
    assert_eq!(decode("ff"), Ok(255));
    assert_eq!(decode("1000"), Ok(4096));
}

#[test]
fn test_round_trip_for_recipe_255() {
    let segment = encode(255);
    assert_eq!(segment, "ff");
    assert_eq!(decode(&segment), Ok(255));
}

#[test]
fn test_decode_rejects_empty_segment() {
    assert_eq!(decode(""), Err(ShortLinkError::Empty));
}

#[test]
fn test_decode_rejects_non_hex() {
    assert_eq!(decode("12g4"), Err(ShortLinkError::InvalidDigit('g')));
    assert_eq!(decode(" ff"), Err(ShortLinkError::InvalidDigit(' ')));
}

#[test]
fn test_decode_rejects_negative_notation() {
    assert_eq!(decode("-1"), Err(ShortLinkError::InvalidDigit('-')));
}

#[test]
fn test_decode_rejects_values_exceeding_i64() {
    assert_eq!(decode("ffffffffffffffff"), Err(ShortLinkError::Overflow));
    assert_eq!(decode("7fffffffffffffff"), Ok(i64::MAX));
}

proptest! {
    #[test]
    fn prop_codec_round_trips(id in 0i64..=i64::MAX) {
        prop_assert_eq!(decode(&encode(id)), Ok(id));
    }

    #[test]
    fn prop_encoded_segment_is_lowercase_hex(id in 0i64..=i64::MAX) {
        let segment = encode(id);
        prop_assert!(segment.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
