//! Stable decimal rendering.
//!
//! `BigDecimal`'s own `Display` switches to exponent form depending on scale,
//! so reports go through these helpers instead.

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Zero;

/// Integer digits beyond which [`grouped`] switches to scientific form
pub const SCIENTIFIC_THRESHOLD_DIGITS: usize = 24;

/// Exact plain decimal string with no exponent and no trailing zeros
#[must_use]
pub fn plain(value: &BigDecimal) -> String {
    let (digits, scale) = value.normalized().as_bigint_and_exponent();
    let (negative, magnitude) = split_sign(&digits);
    let (int_part, frac_part) = place_point(&magnitude.to_string(), scale);
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&int_part);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(&frac_part);
    }
    out
}

/// Rounded to `decimals` places with `,` thousands separators
///
/// Values with more than [`SCIENTIFIC_THRESHOLD_DIGITS`] integer digits
/// are rendered as `d.dde<exp>` instead.
#[must_use]
pub fn grouped(value: &BigDecimal, decimals: u32) -> String {
    let (digits, scale) = value.as_bigint_and_exponent();
    let (negative, magnitude) = split_sign(&digits);
    let rounded = round_half_up(magnitude, scale, decimals);
    let (int_part, frac_part) = place_point(&rounded.to_string(), i64::from(decimals));

    let sign = if negative && !rounded.is_zero() { "-" } else { "" };
    if int_part.len() > SCIENTIFIC_THRESHOLD_DIGITS {
        return format!("{sign}{}", scientific(&int_part, decimals));
    }

    let mut out = String::from(sign);
    out.push_str(&group_thousands(&int_part));
    if decimals > 0 {
        out.push('.');
        out.push_str(&frac_part);
    }
    out
}

fn split_sign(value: &BigInt) -> (bool, BigUint) {
    (value.sign() == Sign::Minus, value.magnitude().clone())
}

/// Scale `magnitude × 10^-scale` to exactly `decimals` places, rounding half up
fn round_half_up(magnitude: BigUint, scale: i64, decimals: u32) -> BigUint {
    let target = i64::from(decimals);
    if scale <= target {
        let widen = u32::try_from(target - scale).unwrap_or(u32::MAX);
        return magnitude * BigUint::from(10u32).pow(widen);
    }
    let narrow = u32::try_from(scale - target).unwrap_or(u32::MAX);
    let divisor = BigUint::from(10u32).pow(narrow);
    let quotient = &magnitude / &divisor;
    let remainder = &magnitude % &divisor;
    if remainder * 2u32 >= divisor {
        quotient + 1u32
    } else {
        quotient
    }
}

/// Split a digit string at `scale` places from the right
fn place_point(digits: &str, scale: i64) -> (String, String) {
    if scale <= 0 {
        let mut int_part = digits.to_string();
        if digits != "0" {
            int_part.push_str(&"0".repeat(scale.unsigned_abs() as usize));
        }
        return (int_part, String::new());
    }
    let scale = scale as usize;
    if digits.len() <= scale {
        let frac = format!("{}{digits}", "0".repeat(scale - digits.len()));
        return ("0".to_string(), frac);
    }
    let (int_part, frac_part) = digits.split_at(digits.len() - scale);
    (int_part.to_string(), frac_part.to_string())
}

fn group_thousands(int_part: &str) -> String {
    let mut out = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `d.dd…e<exp>` with the mantissa rounded half up
fn scientific(int_part: &str, decimals: u32) -> String {
    let keep = (1 + decimals as usize).min(int_part.len());
    let mut digits: Vec<u8> = int_part.as_bytes()[..keep].to_vec();
    let mut exponent = int_part.len() - 1;

    if int_part.as_bytes().get(keep).is_some_and(|d| *d >= b'5') {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            // 9.99 rounded up to 10.0: shift into the exponent
            digits.insert(0, b'1');
            digits.pop();
            exponent += 1;
        }
    }

    let lead = char::from(digits[0]);
    let rest: String = digits[1..].iter().map(|&d| char::from(d)).collect();
    if rest.is_empty() {
        format!("{lead}e{exponent}")
    } else {
        format!("{lead}.{rest}e{exponent}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::pow10;
    use std::str::FromStr;

    fn dec(raw: &str) -> BigDecimal {
        BigDecimal::from_str(raw).unwrap()
    }

    #[test]
    fn plain_has_no_exponent() {
        assert_eq!(plain(&pow10(6)), "1000000");
        assert_eq!(plain(&dec("3.50")), "3.5");
        assert_eq!(plain(&dec("-0.025")), "-0.025");
        assert_eq!(plain(&dec("0")), "0");
        assert_eq!(plain(&(dec("2.1") * pow10(9))), "2100000000");
    }

    #[test]
    fn grouped_rounds_and_separates() {
        assert_eq!(grouped(&dec("2100000000"), 2), "2,100,000,000.00");
        assert_eq!(grouped(&dec("450000"), 2), "450,000.00");
        assert_eq!(grouped(&dec("1234.565"), 2), "1,234.57");
        assert_eq!(grouped(&dec("0.004"), 2), "0.00");
        assert_eq!(grouped(&dec("-1234.5"), 0), "-1,235");
        assert_eq!(grouped(&dec("999"), 2), "999.00");
    }

    #[test]
    fn grouped_switches_to_scientific_for_huge_values() {
        assert_eq!(grouped(&pow10(120), 2), "1.00e120");
        assert_eq!(grouped(&(dec("2.5") * pow10(30)), 2), "2.50e30");
        assert_eq!(grouped(&dec("19999999999999999999999999"), 2), "2.00e25");
        assert_eq!(grouped(&dec("12349999999999999999999999"), 2), "1.23e25");
        assert_eq!(grouped(&dec("12350000000000000000000000"), 2), "1.24e25");
        assert_eq!(grouped(&dec("99999999999999999999999999"), 0), "1e26");
    }
}
