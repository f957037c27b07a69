use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::IsaFinanceError;
use crate::types::{Money, Rate};
use crate::IsaFinanceResult;

const CONVERGENCE_THRESHOLD: Decimal = dec!(0.0000001);
const MAX_IRR_ITERATIONS: u32 = 100;

/// Net Present Value of a series of equally spaced cash flows,
/// discounted at a per-period rate.
pub fn npv(rate: Rate, cash_flows: &[Money]) -> IsaFinanceResult<Money> {
    if rate <= dec!(-1) {
        return Err(IsaFinanceError::InvalidInput {
            field: "rate".into(),
            reason: "Discount rate must be greater than -100%".into(),
        });
    }

    let mut result = Decimal::ZERO;
    let one_plus_r = Decimal::ONE + rate;
    let mut discount = Decimal::ONE;

    for (t, cf) in cash_flows.iter().enumerate() {
        if t > 0 {
            discount *= one_plus_r;
        }
        if discount.is_zero() {
            return Err(IsaFinanceError::DivisionByZero {
                context: format!("NPV discount factor at period {t}"),
            });
        }
        result += cf / discount;
    }

    Ok(result)
}

/// Per-period internal rate of return using Newton-Raphson.
///
/// Period length is whatever spacing the caller's cash flows carry;
/// for monthly flows the result is a monthly rate and the caller
/// annualizes it.
pub fn periodic_irr(cash_flows: &[Money], guess: Rate) -> IsaFinanceResult<Rate> {
    if cash_flows.len() < 2 {
        return Err(IsaFinanceError::InsufficientData(
            "IRR requires at least 2 cash flows".into(),
        ));
    }

    let mut rate = guess;

    for i in 0..MAX_IRR_ITERATIONS {
        let one_plus_r = Decimal::ONE + rate;
        if one_plus_r <= Decimal::ZERO {
            return Err(IsaFinanceError::ConvergenceFailure {
                function: "periodic IRR".into(),
                iterations: i,
                last_delta: rate,
            });
        }

        let mut npv_val = Decimal::ZERO;
        let mut dnpv = Decimal::ZERO;
        let mut discount = Decimal::ONE;

        for (t, cf) in cash_flows.iter().enumerate() {
            if t > 0 {
                discount *= one_plus_r;
            }
            if discount.is_zero() {
                continue;
            }
            npv_val += cf / discount;
            if t > 0 {
                dnpv -= Decimal::from(t as i64) * cf / (discount * one_plus_r);
            }
        }

        if npv_val.abs() < CONVERGENCE_THRESHOLD {
            return Ok(rate);
        }

        if dnpv.is_zero() {
            return Err(IsaFinanceError::ConvergenceFailure {
                function: "periodic IRR".into(),
                iterations: i,
                last_delta: npv_val,
            });
        }

        rate -= npv_val / dnpv;

        // Guard against divergence
        if rate < dec!(-0.99) {
            rate = dec!(-0.99);
        } else if rate > dec!(100.0) {
            rate = dec!(100.0);
        }
    }

    Err(IsaFinanceError::ConvergenceFailure {
        function: "periodic IRR".into(),
        iterations: MAX_IRR_ITERATIONS,
        last_delta: npv(rate, cash_flows).unwrap_or(Decimal::MAX),
    })
}
