//! Money helpers: tax application and US-dollar formatting.
//!
//! Amounts are plain `f64` currency units. Rounding to cents only happens
//! when formatting; every computation keeps full precision.

use rust_decimal::prelude::*;

/// Add a percentage tax to `amount`.
///
/// The rate is not clamped: a negative rate acts as a discount.
#[must_use]
pub fn apply_tax(amount: f64, rate_percent: f64) -> f64 {
    amount + tax_amount(amount, rate_percent)
}

/// The tax component alone for `amount` at `rate_percent`.
#[must_use]
pub fn tax_amount(amount: f64, rate_percent: f64) -> f64 {
    amount * (rate_percent / 100.0)
}

/// Format `amount` as US dollars with two decimals and thousands
/// separators, e.g. `$1,234.56` or `-$0.50`.
///
/// Cents are rounded half away from zero on the shortest decimal form of
/// the value, so `1.005` prints as `$1.01`. An amount that rounds to zero
/// prints as `$0.00` with no sign, even when negative.
#[must_use]
pub fn format_currency(amount: f64) -> String {
    if amount.is_nan() {
        return "$NaN".to_string();
    }
    if amount.is_infinite() {
        let sign = if amount < 0.0 { "-" } else { "" };
        return format!("{sign}$∞");
    }

    let fixed = round_cents(amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0 && fixed != "0.00" {
        "-"
    } else {
        ""
    };
    format!("{sign}${}.{cents}", group_thousands(whole))
}

/// Two-decimal rendering of a non-negative finite amount.
fn round_cents(amount: f64) -> String {
    // f64 Display yields the shortest string that round-trips
    match Decimal::from_str(&amount.to_string()) {
        Ok(value) => {
            let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            format!("{rounded:.2}")
        }
        // beyond Decimal's range an f64 holds no fraction
        Err(_) => format!("{}.00", amount.trunc()),
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
