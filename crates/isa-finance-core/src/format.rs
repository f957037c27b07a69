//! Display formatting for calculator results.
//!
//! US-dollar amounts render with thousands separators and no decimal
//! places; rates render as percentages with one decimal place. All
//! functions are total: any finite input yields a string or a Decimal,
//! never an error.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::types::{Money, Rate};

const HUNDRED: Decimal = dec!(100);

/// Format a dollar amount for display: `1234.56` → `"$1,235"`.
///
/// Rounds half away from zero to the nearest whole dollar.
pub fn currency(amount: Money) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let grouped = group_thousands(&rounded.abs().to_string());
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Format a decimal rate as a percentage: `0.05` → `"5.0%"`.
pub fn percent(rate: Rate) -> String {
    let pct = (rate * HUNDRED).round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{pct:.1}%")
}

/// Round to the nearest 100 units, half away from zero.
///
/// Used to produce clean suggested amounts for sliders and steppers:
/// `1249` → `1200`, `1250` → `1300`.
pub fn round_hundred(n: Money) -> Money {
    (n / HUNDRED).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero) * HUNDRED
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency_rounds_to_whole_dollars() {
        assert_eq!(currency(dec!(1234.56)), "$1,235");
    }

    #[test]
    fn test_currency_grouping() {
        assert_eq!(currency(dec!(0)), "$0");
        assert_eq!(currency(dec!(999)), "$999");
        assert_eq!(currency(dec!(1000)), "$1,000");
        assert_eq!(currency(dec!(1000000)), "$1,000,000");
        assert_eq!(currency(dec!(25050.49)), "$25,050");
    }

    #[test]
    fn test_currency_negative() {
        assert_eq!(currency(dec!(-500.4)), "-$500");
        // A fraction that rounds to zero keeps the plain form
        assert_eq!(currency(dec!(-0.4)), "$0");
    }

    #[test]
    fn test_percent_one_decimal() {
        assert_eq!(percent(dec!(0.05)), "5.0%");
        assert_eq!(percent(dec!(0.0525)), "5.3%");
        assert_eq!(percent(dec!(0)), "0.0%");
        assert_eq!(percent(dec!(1)), "100.0%");
    }

    #[test]
    fn test_round_hundred_tie_break() {
        assert_eq!(round_hundred(dec!(1249)), dec!(1200));
        assert_eq!(round_hundred(dec!(1250)), dec!(1300));
        assert_eq!(round_hundred(dec!(1299)), dec!(1300));
        assert_eq!(round_hundred(dec!(-1250)), dec!(-1300));
        assert_eq!(round_hundred(dec!(0)), dec!(0));
    }

    #[test]
    fn test_formatting_is_pure() {
        let a = currency(dec!(98765.43));
        let b = currency(dec!(98765.43));
        assert_eq!(a, b);
    }
}
