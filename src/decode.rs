// Decoding of share values.
//
// A share's y value arrives as text in some radix between 2 and 36. We
// accumulate into a BigInt so that no value, however long, loses
// magnitude on the way in:
//
// value = d_0 * r**0  +  d_1 * r**1  +  ...  +  d_m * r**m
//
// where d_0 is the rightmost character.

use num_bigint::BigInt;
use num_traits::Zero;
use serde_json::Value;

use crate::error::{Result, ShareError};

pub const MIN_RADIX: u32 = 2;
pub const MAX_RADIX: u32 = 36;

/// Value of one digit character, or None if it isn't alphanumeric ASCII.
/// Letters are case-insensitive: 'a' and 'A' are both 10, 'z' is 35.
fn digit_value(c: char) -> Option<u32> {
    match c {
        '0'..='9' => Some(c as u32 - '0' as u32),
        'a'..='z' => Some(c as u32 - 'a' as u32 + 10),
        'A'..='Z' => Some(c as u32 - 'A' as u32 + 10),
        _ => None,
    }
}

/// Decode `value` in the given `radix` to an exact integer.
///
/// Every character must be a valid digit for `radix`; anything else is an
/// `InvalidDigit` error, never skipped or truncated.
pub fn decode(value: &str, radix: u32) -> Result<BigInt> {
    if !(MIN_RADIX..=MAX_RADIX).contains(&radix) {
        return Err(ShareError::InvalidRadix(radix));
    }
    if value.is_empty() {
        return Err(ShareError::EmptyValue);
    }

    // Horner's rule, most significant digit first. Same sum as weighting
    // each digit by radix**position from the right.
    let mut acc = BigInt::zero();
    for (position, digit) in value.chars().enumerate() {
        let d = match digit_value(digit) {
            Some(d) if d < radix => d,
            _ => return Err(ShareError::InvalidDigit { digit, position, radix }),
        };
        acc = acc * radix + d;
    }
    Ok(acc)
}

/// Normalise a radix given either as a JSON number or as a decimal string.
pub fn parse_radix(field: &Value) -> Result<u32> {
    let radix = match field {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| ShareError::Format(format!("radix {} is not a positive integer", n)))?,
        Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| ShareError::Format(format!("radix {:?} is not a decimal integer", s)))?,
        other => {
            return Err(ShareError::Format(format!(
                "radix must be a number or a string, got {}",
                other
            )))
        }
    };
    if radix < MIN_RADIX as u64 || radix > MAX_RADIX as u64 {
        // clamp for the error message; anything this large is out anyway
        return Err(ShareError::InvalidRadix(radix.min(u32::MAX as u64) as u32));
    }
    Ok(radix as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;
    use serde_json::json;

    #[test]
    fn decodes_small_values() {
        assert_eq!(decode("111", 2).unwrap(), BigInt::from(7));
        assert_eq!(decode("213", 4).unwrap(), BigInt::from(39));
        assert_eq!(decode("166270", 10).unwrap(), BigInt::from(166270));
        assert_eq!(decode("ff", 16).unwrap(), BigInt::from(255));
        assert_eq!(decode("zz", 36).unwrap(), BigInt::from(35 * 36 + 35));
        assert_eq!(decode("0", 7).unwrap(), BigInt::zero());
    }

    #[test]
    fn letters_are_case_insensitive() {
        assert_eq!(decode("DeadBeef", 16).unwrap(), decode("deadbeef", 16).unwrap());
        assert_eq!(decode("Z", 36).unwrap(), BigInt::from(35));
    }

    #[test]
    fn leading_zeros_do_not_change_the_value() {
        assert_eq!(decode("000101", 2).unwrap(), BigInt::from(5));
    }

    #[test]
    fn matches_positional_sum() {
        let s = "3a0c1";
        let radix = 13u32;
        let mut expected = BigInt::zero();
        let mut weight = BigInt::one();
        for c in s.chars().rev() {
            expected += &weight * c.to_digit(radix).unwrap();
            weight *= radix;
        }
        assert_eq!(decode(s, radix).unwrap(), expected);
    }

    #[test]
    fn digit_too_large_for_radix() {
        match decode("9", 8) {
            Err(ShareError::InvalidDigit { digit, position, radix }) => {
                assert_eq!((digit, position, radix), ('9', 0, 8));
            }
            other => panic!("expected InvalidDigit, got {:?}", other),
        }
        assert!(matches!(
            decode("12b4", 10),
            Err(ShareError::InvalidDigit { digit: 'b', position: 2, .. })
        ));
        assert!(matches!(decode("102", 2), Err(ShareError::InvalidDigit { .. })));
    }

    #[test]
    fn non_alphanumeric_is_rejected() {
        assert!(matches!(decode("12 3", 10), Err(ShareError::InvalidDigit { digit: ' ', .. })));
        assert!(matches!(decode("-5", 10), Err(ShareError::InvalidDigit { digit: '-', .. })));
        assert!(matches!(decode("é", 36), Err(ShareError::InvalidDigit { .. })));
    }

    #[test]
    fn bad_radix_and_empty_value() {
        assert!(matches!(decode("1", 1), Err(ShareError::InvalidRadix(1))));
        assert!(matches!(decode("1", 37), Err(ShareError::InvalidRadix(37))));
        assert!(matches!(decode("", 10), Err(ShareError::EmptyValue)));
    }

    #[test]
    fn forty_hex_digits_are_exact() {
        let value = "ffffffffffffffffffffffffffffffffffffffff";
        let expected = BigInt::from(2u32).pow(160u32) - 1;
        assert_eq!(decode(value, 16).unwrap(), expected);

        // one past 2**64 survives too
        assert_eq!(
            decode("18446744073709551617", 10).unwrap(),
            BigInt::from(u64::MAX) + 2
        );
    }

    #[test]
    fn radix_from_number_or_string() {
        assert_eq!(parse_radix(&json!(16)).unwrap(), 16);
        assert_eq!(parse_radix(&json!("16")).unwrap(), 16);
        assert_eq!(parse_radix(&json!(" 2 ")).unwrap(), 2);
        assert!(matches!(parse_radix(&json!(40)), Err(ShareError::InvalidRadix(40))));
        assert!(matches!(parse_radix(&json!("0")), Err(ShareError::InvalidRadix(0))));
        assert!(matches!(parse_radix(&json!("hex")), Err(ShareError::Format(_))));
        assert!(matches!(parse_radix(&json!(2.5)), Err(ShareError::Format(_))));
        assert!(matches!(parse_radix(&json!(null)), Err(ShareError::Format(_))));
    }
}
