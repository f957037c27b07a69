//! Closed-form amortizing-loan formulas.
//!
//! These are total functions: they do not validate, and garbage in
//! yields garbage out. Range checking belongs to the quote envelope
//! (or whichever caller feeds them).

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::types::{Money, Rate};

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Level monthly payment for an amortizing loan.
///
/// A zero rate degrades to straight-line `principal / term_months`;
/// a zero term is defined as a zero payment rather than a division
/// by zero.
pub fn monthly_payment(annual_rate: Rate, term_months: u32, principal: Money) -> Money {
    if term_months == 0 {
        return Decimal::ZERO;
    }
    let n = Decimal::from(term_months);
    if annual_rate.is_zero() {
        return principal / n;
    }

    let monthly_rate = annual_rate / MONTHS_PER_YEAR;
    let factor = (Decimal::ONE + monthly_rate).powd(n);
    let annuity = factor - Decimal::ONE;
    if annuity.is_zero() {
        // Rate too small to register at Decimal precision
        return principal / n;
    }
    principal * monthly_rate * factor / annuity
}

/// Interest paid over the life of the loan: `payment × n − principal`.
///
/// May come out negative on inconsistent inputs; display layers clamp.
pub fn total_interest(principal: Money, monthly_payment: Money, term_months: u32) -> Money {
    monthly_payment * Decimal::from(term_months) - principal
}

/// Total of all payments over the term.
pub fn total_payment(monthly_payment: Money, term_months: u32) -> Money {
    monthly_payment * Decimal::from(term_months)
}
