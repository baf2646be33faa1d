//! Currency formatting utilities for Bitcoin and Monero values
//!
//! All formatting is done on integers or exact decimals; no floating point is
//! involved, so satoshi precision is preserved for any `u64` amount.

use bigdecimal::num_bigint::{BigInt, Sign};
use bigdecimal::BigDecimal;

/// Satoshis per Bitcoin
pub const SATS_PER_BTC: u64 = 100_000_000;

/// Format a satoshi amount as BTC with exactly 8 decimal places
///
/// # Examples
/// ```
/// use atomic_swap_watch::utils::currency::format_btc;
///
/// assert_eq!(format_btc(4_200_000), "0.04200000");
/// assert_eq!(format_btc(28125351850), "281.25351850");
/// ```
pub fn format_btc(sats: u64) -> String {
    format!("{}.{:08}", sats / SATS_PER_BTC, sats % SATS_PER_BTC)
}

/// Format a satoshi amount as dual BTC + sats display
///
/// # Examples
/// ```
/// use atomic_swap_watch::utils::currency::format_sats_as_btc;
///
/// assert_eq!(
///     format_sats_as_btc(5471),
///     "0.00005471 BTC (5471 sats)"
/// );
/// ```
pub fn format_sats_as_btc(sats: u64) -> String {
    format!("{} BTC ({} sats)", format_btc(sats), sats)
}

/// Format a decimal with a fixed number of places, rounding half to even
///
/// # Examples
/// ```
/// use atomic_swap_watch::utils::currency::format_decimal;
/// use bigdecimal::BigDecimal;
/// use std::str::FromStr;
///
/// let xmr = BigDecimal::from_str("10.99405").unwrap();
/// assert_eq!(format_decimal(&xmr, 4), "10.9940");
/// ```
pub fn format_decimal(value: &BigDecimal, places: u32) -> String {
    let scaled = round_half_even(value, places);

    let negative = scaled.sign() == Sign::Minus;
    let magnitude = if negative { -scaled } else { scaled };
    let digits = magnitude.to_string();

    let places = places as usize;
    let (whole, frac) = if places == 0 {
        (digits, String::new())
    } else if digits.len() > places {
        let (w, f) = digits.split_at(digits.len() - places);
        (w.to_string(), f.to_string())
    } else {
        ("0".to_string(), format!("{:0>width$}", digits, width = places))
    };

    let sign = if negative { "-" } else { "" };
    if frac.is_empty() {
        format!("{}{}", sign, whole)
    } else {
        format!("{}{}.{}", sign, whole, frac)
    }
}

/// `value * 10^places`, rounded half to even, as an integer
fn round_half_even(value: &BigDecimal, places: u32) -> BigInt {
    let (mantissa, scale) = value.as_bigint_and_exponent();
    let target = places as i64;

    if scale <= target {
        return mantissa * BigInt::from(10u32).pow((target - scale) as u32);
    }

    let divisor = BigInt::from(10u32).pow((scale - target) as u32);
    let negative = mantissa.sign() == Sign::Minus;
    let magnitude = if negative { -mantissa } else { mantissa };

    let mut quotient = &magnitude / &divisor;
    let remainder = &magnitude % &divisor;
    let twice = remainder * BigInt::from(2u32);

    let round_up = match twice.cmp(&divisor) {
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Equal => (&quotient % BigInt::from(2u32)) == BigInt::from(1u32),
    };
    if round_up {
        quotient += BigInt::from(1u32);
    }

    if negative {
        -quotient
    } else {
        quotient
    }
}
