//! Display formatting for monetary amounts.

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount with thousands separators and exactly two decimals.
///
/// Halves round away from zero. Negative amounts put the sign before the
/// currency symbol.
///
/// # Examples
///
/// ```
/// use payslip_mailer::calculation::format_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let amount = Decimal::from_str("1234567.891").unwrap();
/// assert_eq!(format_currency(amount, "$"), "$1,234,567.89");
/// assert_eq!(format_currency(-amount, "$"), "-$1,234,567.89");
/// ```
pub fn format_currency(amount: Decimal, symbol: &str) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    let mut magnitude = rounded.abs();
    magnitude.rescale(2);
    let digits = magnitude.to_string();
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!(
        "{}{}{}.{}",
        if negative { "-" } else { "" },
        symbol,
        group_thousands(whole),
        cents
    )
}

fn group_thousands(whole: &str) -> String {
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
