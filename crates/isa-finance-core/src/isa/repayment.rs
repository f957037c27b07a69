//! Income-share repayment formulas.
//!
//! Total functions, no validation; the quote and projection envelopes
//! range-check before calling.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{Money, Multiple, Rate};

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Monthly income-share obligation: `annual_income × repayment_rate / 12`.
///
/// Zero when either input is non-positive.
pub fn monthly_payment(annual_income: Money, repayment_rate: Rate) -> Money {
    if annual_income <= Decimal::ZERO || repayment_rate <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    annual_income * repayment_rate / MONTHS_PER_YEAR
}

/// Monthly obligation with the income floor applied.
///
/// Income at or below the floor owes nothing; above it, the full rate
/// applies to the entire income (the floor gates the payment, it does
/// not shelter the first slice of income).
pub fn floored_monthly_payment(
    annual_income: Money,
    income_floor: Money,
    repayment_rate: Rate,
) -> Money {
    if annual_income <= income_floor {
        return Decimal::ZERO;
    }
    monthly_payment(annual_income, repayment_rate)
}

/// Maximum total repayable: `amount_financed × cap_multiple`.
pub fn repayment_cap(amount_financed: Money, cap_multiple: Multiple) -> Money {
    amount_financed * cap_multiple
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_payment_exact() {
        // 60,000 × 5% / 12 = 250.00 exactly
        assert_eq!(monthly_payment(dec!(60000), dec!(0.05)), dec!(250));
    }

    #[test]
    fn test_monthly_payment_zero_on_non_positive_inputs() {
        assert_eq!(monthly_payment(dec!(0), dec!(0.05)), Decimal::ZERO);
        assert_eq!(monthly_payment(dec!(-100), dec!(0.05)), Decimal::ZERO);
        assert_eq!(monthly_payment(dec!(60000), dec!(0)), Decimal::ZERO);
        assert_eq!(monthly_payment(dec!(60000), dec!(-0.05)), Decimal::ZERO);
    }

    #[test]
    fn test_floor_gates_payment_to_zero() {
        assert_eq!(
            floored_monthly_payment(dec!(30000), dec!(40000), dec!(0.05)),
            Decimal::ZERO
        );
        // Income exactly at the floor owes nothing
        assert_eq!(
            floored_monthly_payment(dec!(40000), dec!(40000), dec!(0.05)),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_full_rate_applies_above_floor() {
        // Above the floor the whole income is shared, not just the excess
        assert_eq!(
            floored_monthly_payment(dec!(60000), dec!(20000), dec!(0.05)),
            dec!(250)
        );
    }

    #[test]
    fn test_repayment_cap() {
        assert_eq!(repayment_cap(dec!(10000), dec!(2.5)), dec!(25000));
    }

    #[test]
    fn test_repayment_is_pure() {
        let a = floored_monthly_payment(dec!(85000), dec!(30000), dec!(0.07));
        let b = floored_monthly_payment(dec!(85000), dec!(30000), dec!(0.07));
        assert_eq!(a, b);
    }
}
