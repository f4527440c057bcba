//! Forgiving number parsing for values typed into calculator fields.
//!
//! The leading numeric part of the text is used (`"12.5%"` reads as 12.5,
//! `"7 years"` as 7) and text with no leading number reads as zero, so a
//! half-typed field never aborts a recalculation.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Longest prefix of `s` (after leading whitespace) that looks like a number.
fn numeric_prefix(s: &str, allow_fraction: bool) -> &str {
    let s = s.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;

    for (i, c) in s.char_indices() {
        match c {
            '+' | '-' if i == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if allow_fraction && !seen_dot => seen_dot = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }

    if seen_digit {
        s[..end].trim_end_matches('.')
    } else {
        ""
    }
}

/// Parse a decimal amount or rate, reading unparseable text as zero.
pub fn decimal_or_zero(s: &str) -> Decimal {
    let prefix = numeric_prefix(s, true);
    Decimal::from_str(prefix).unwrap_or(Decimal::ZERO)
}

/// Parse a whole number of years or months, reading unparseable text as zero.
/// Any fractional part is dropped.
pub fn int_or_zero(s: &str) -> i64 {
    numeric_prefix(s, false).parse().unwrap_or(0)
}

/// clap value parser for amounts and rates.
pub fn lenient_decimal(s: &str) -> Result<Decimal, String> {
    Ok(decimal_or_zero(s))
}

/// clap value parser for tenure parts.
pub fn lenient_int(s: &str) -> Result<i64, String> {
    Ok(int_or_zero(s))
}
