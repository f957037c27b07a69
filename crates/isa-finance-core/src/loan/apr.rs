//! Annual percentage rate, two ways.
//!
//! `fee_adjusted_apr` is the display approximation the calculator has
//! always shown: the nominal rate inflated by origination fees spread
//! evenly over the term. `effective_apr` is the exact figure, solving
//! for the internal rate of the net-disbursement cash flows. Both
//! return percentages (5.0 means 5%), not fractions.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::time_value;
use crate::types::{Money, Rate};
use crate::IsaFinanceResult;

const HUNDRED: Decimal = dec!(100);
const MONTHS_PER_YEAR: Decimal = dec!(12);
const DEFAULT_MONTHLY_GUESS: Decimal = dec!(0.005);

/// Fee-adjusted APR approximation, as a percentage.
///
/// Treats fees as extra rate spread evenly across the term:
/// `(rate + fees / principal / term_years) × 100`. This is a documented
/// simplification, not an actuarially exact APR; see [`effective_apr`]
/// for the solver.
pub fn fee_adjusted_apr(principal: Money, annual_rate: Rate, term_years: u32, fees: Money) -> Rate {
    if principal <= Decimal::ZERO || term_years == 0 {
        return annual_rate * HUNDRED;
    }
    let fee_rate = fees / principal / Decimal::from(term_years);
    (annual_rate + fee_rate) * HUNDRED
}

/// Exact APR via Newton-Raphson, as a percentage.
///
/// Solves the monthly internal rate of the borrower's cash flows (a
/// net disbursement of `principal − fees` against `term_months` level
/// payments) and annualizes nominally (monthly rate × 12).
pub fn effective_apr(
    principal: Money,
    fees: Money,
    monthly_payment: Money,
    term_months: u32,
) -> IsaFinanceResult<Rate> {
    let net_disbursement = principal - fees;
    let mut cash_flows: Vec<Money> = Vec::with_capacity(term_months as usize + 1);
    cash_flows.push(-net_disbursement);
    cash_flows.extend(std::iter::repeat(monthly_payment).take(term_months as usize));

    let monthly = time_value::periodic_irr(&cash_flows, DEFAULT_MONTHLY_GUESS)?;
    Ok(monthly * MONTHS_PER_YEAR * HUNDRED)
}
