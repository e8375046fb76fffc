//! Conversions between human readable NEAR amounts and yocto integers.
//!
//! Amounts are only converted at the boundary. Arithmetic and comparisons
//! stay in `BigUint` yocto units.

use num_bigint::BigUint;
use num_traits::Zero;
use std::str::FromStr;

/// 1 NEAR = 10^24 yocto.
pub const NEAR_NOMINATION_EXP: usize = 24;

/// Fractional digits shown in amount fields.
pub const DISPLAY_FRAC_DIGITS: usize = 5;

pub fn near_nomination() -> BigUint {
    BigUint::from(10u8).pow(NEAR_NOMINATION_EXP as u32)
}

/// Removes thousands separators and surrounding whitespace.
pub fn strip_separators(amount: &str) -> String {
    amount.trim().replace(',', "")
}

/// Digits with at most one '.', at least one digit overall, and no more
/// fractional digits than a yocto amount can carry.
pub fn is_decimal_string(amount: &str) -> bool {
    let (whole, frac) = match amount.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (amount, ""),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

    !(whole.is_empty() && frac.is_empty())
        && all_digits(whole)
        && all_digits(frac)
        && frac.len() <= NEAR_NOMINATION_EXP
}

/// Parses a decimal NEAR amount into yocto. Separators are stripped first.
pub fn parse_near_amount(amount: &str) -> Option<BigUint> {
    let cleaned = strip_separators(amount);
    if !is_decimal_string(&cleaned) {
        return None;
    }
    let (whole, frac) = cleaned.split_once('.').unwrap_or((cleaned.as_str(), ""));

    let mut digits = String::with_capacity(whole.len() + NEAR_NOMINATION_EXP);
    digits.push_str(whole);
    digits.push_str(frac);
    digits.extend(std::iter::repeat('0').take(NEAR_NOMINATION_EXP - frac.len()));

    BigUint::from_str(&digits).ok()
}

/// Formats yocto as NEAR with thousands separators, cutting (never rounding)
/// to `frac_digits` and dropping trailing zeros.
pub fn format_near_amount(yocto: &BigUint, frac_digits: usize) -> String {
    let nomination = near_nomination();
    let whole = yocto / &nomination;
    let frac = yocto % &nomination;

    let frac_padded = format!("{:0>width$}", frac.to_string(), width = NEAR_NOMINATION_EXP);
    let shown = &frac_padded[..frac_digits.min(NEAR_NOMINATION_EXP)];
    let shown = shown.trim_end_matches('0');

    let whole = with_commas(&whole.to_string());
    if shown.is_empty() {
        whole
    } else {
        format!("{}.{}", whole, shown)
    }
}

fn with_commas(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Parses an integer yocto string as returned by contracts. Anything else is
/// `None`, including negatives and decimals.
pub fn parse_yocto(raw: &str) -> Option<BigUint> {
    let raw = raw.trim().trim_matches('"');
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    BigUint::from_str(raw).ok()
}

pub fn is_positive(amount: &BigUint) -> bool {
    !amount.is_zero()
}
