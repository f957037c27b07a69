//! Month-by-month amortization schedule.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::loan::payment;
use crate::types::{Money, Rate};

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// A single row of the amortization schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationPeriod {
    pub month: u32,
    pub payment_date: NaiveDate,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    pub balance: Money,
}

/// Build the full amortization schedule for a level-payment loan.
///
/// The final period absorbs any residual so the balance lands on
/// exactly zero. A zero term yields an empty schedule.
pub fn amortization_schedule(
    principal: Money,
    annual_rate: Rate,
    term_months: u32,
    first_payment: NaiveDate,
) -> Vec<AmortizationPeriod> {
    if term_months == 0 {
        return Vec::new();
    }

    let monthly_rate = annual_rate / MONTHS_PER_YEAR;
    let level_payment = payment::monthly_payment(annual_rate, term_months, principal);

    let mut schedule: Vec<AmortizationPeriod> = Vec::with_capacity(term_months as usize);
    let mut balance = principal;

    for month in 1..=term_months {
        let interest = balance * monthly_rate;
        let (pay, principal_part) = if month == term_months {
            // Final period: clear the remaining balance exactly
            (balance + interest, balance)
        } else {
            (level_payment, level_payment - interest)
        };

        balance -= principal_part;

        schedule.push(AmortizationPeriod {
            month,
            payment_date: first_payment + Months::new(month - 1),
            payment: pay,
            interest,
            principal: principal_part,
            balance,
        });
    }

    schedule
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_zero_rate_schedule_is_straight_line() {
        let schedule = amortization_schedule(dec!(1200), dec!(0), 12, date(2026, 1, 15));
        assert_eq!(schedule.len(), 12);
        for row in &schedule {
            assert_eq!(row.payment, dec!(100));
            assert_eq!(row.interest, Decimal::ZERO);
        }
        assert_eq!(schedule.last().unwrap().balance, Decimal::ZERO);
    }

    #[test]
    fn test_balance_reaches_exactly_zero() {
        let schedule = amortization_schedule(dec!(10000), dec!(0.05), 60, date(2026, 3, 1));
        assert_eq!(schedule.len(), 60);
        assert_eq!(schedule.last().unwrap().balance, Decimal::ZERO);

        let principal_total: Decimal = schedule.iter().map(|r| r.principal).sum();
        assert_eq!(principal_total, dec!(10000));
    }

    #[test]
    fn test_balance_decreases_monotonically() {
        let schedule = amortization_schedule(dec!(10000), dec!(0.05), 60, date(2026, 3, 1));
        let mut previous = dec!(10000);
        for row in &schedule {
            assert!(row.balance < previous, "month {}: balance must fall", row.month);
            previous = row.balance;
        }
    }

    #[test]
    fn test_payment_dates_advance_monthly() {
        let schedule = amortization_schedule(dec!(1200), dec!(0), 3, date(2026, 1, 31));
        assert_eq!(schedule[0].payment_date, date(2026, 1, 31));
        // Chrono clamps to the end of shorter months
        assert_eq!(schedule[1].payment_date, date(2026, 2, 28));
        assert_eq!(schedule[2].payment_date, date(2026, 3, 31));
    }

    #[test]
    fn test_zero_term_is_empty() {
        assert!(amortization_schedule(dec!(1200), dec!(0.05), 0, date(2026, 1, 1)).is_empty());
    }
}
