//! Short-link codec
//!
//! A recipe's numeric identifier is rendered as a lowercase hexadecimal
//! string for the `/s/<code>` path segment and parsed back for redirect
//! resolution. The mapping is a pure bijection over non-negative identifiers;
//! there is no collision handling, expiry, or persistence.

use crate::error::ShortLinkError;

/// Encodes a recipe identifier as a lowercase hex segment.
///
/// ```
/// assert_eq!(domain_recipes::shortlink::encode(255), "ff");
/// ```
pub fn encode(id: i64) -> String {
    format!("{:x}", id)
}

/// Decodes a short-link segment back into a recipe identifier.
///
/// Accepts upper- and lowercase hex digits. Rejects empty input, sign
/// characters, non-hex digits, and values that do not fit an `i64`.
pub fn decode(segment: &str) -> Result<i64, ShortLinkError> {
    if segment.is_empty() {
        return Err(ShortLinkError::Empty);
    }
    if let Some(bad) = segment.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ShortLinkError::InvalidDigit(bad));
    }
    i64::from_str_radix(segment, 16).map_err(|_| ShortLinkError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_is_lowercase_hex() {
        assert_eq!(encode(0), "0");
        assert_eq!(encode(255), "ff");
        assert_eq!(encode(48879), "beef");
    }

    #[test]
    fn decode_accepts_both_cases() {
        assert_eq!(decode("ff"), Ok(255));
        assert_eq!(decode("FF"), Ok(255));
    }

    #[test]
    fn decode_rejects_sign_and_garbage() {
        assert_eq!(decode(""), Err(ShortLinkError::Empty));
        assert_eq!(decode("-ff"), Err(ShortLinkError::InvalidDigit('-')));
        assert_eq!(decode("+1"), Err(ShortLinkError::InvalidDigit('+')));
        assert_eq!(decode("zz"), Err(ShortLinkError::InvalidDigit('z')));
    }

    #[test]
    fn decode_rejects_overflow() {
        // 17 hex digits cannot fit an i64
        assert_eq!(decode("10000000000000000"), Err(ShortLinkError::Overflow));
    }
}
