//! ISA payoff projection.
//!
//! Walks the payment window month by month under annual income growth,
//! stopping at the repayment cap, and prices the resulting cash flows
//! as an effective annual cost.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::IsaFinanceError;
use crate::format;
use crate::isa::repayment;
use crate::time_value;
use crate::types::{with_metadata, ComputationOutput, Money, Multiple, Rate};
use crate::IsaFinanceResult;

const HUNDRED: Decimal = dec!(100);
const MONTHS_PER_YEAR: Decimal = dec!(12);
const DEFAULT_MONTHLY_GUESS: Decimal = dec!(0.005);

/// Input for an ISA payoff projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsaProjectionInput {
    /// Amount financed.
    pub amount_financed: Money,
    /// Share of income owed, as a decimal (0.05 = 5%).
    pub repayment_rate: Rate,
    /// Annual income in the first projection year.
    pub annual_income: Money,
    /// Income at or below this level owes nothing.
    pub income_floor: Money,
    /// Repayment cap as a multiple of the amount financed.
    pub cap_multiple: Multiple,
    /// Expected annual income growth, as a decimal (0.03 = 3%).
    pub income_growth_rate: Rate,
    /// Length of the payment obligation, in months.
    pub payment_window_months: u32,
}

/// One projected month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsaPaymentPeriod {
    pub month: u32,
    /// Annual income in effect for this month.
    pub annual_income: Money,
    pub payment: Money,
    pub cumulative_paid: Money,
    pub remaining_to_cap: Money,
}

/// Output of an ISA payoff projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsaProjectionOutput {
    pub repayment_cap: Money,
    pub total_repaid: Money,
    pub cap_reached: bool,
    /// Month in which the cap was hit, when it was.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub months_to_cap: Option<u32>,
    /// Nominal annual cost implied by the projected payments, percent.
    /// None when no payments fall inside the window or the solver fails.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_annual_cost: Option<Rate>,
    pub total_repaid_display: String,
    pub schedule: Vec<IsaPaymentPeriod>,
}

/// Project ISA payments month by month until the cap or the window end.
pub fn project_isa(
    input: &IsaProjectionInput,
) -> IsaFinanceResult<ComputationOutput<IsaProjectionOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_projection_input(input)?;

    let cap = repayment::repayment_cap(input.amount_financed, input.cap_multiple);
    let growth_factor = Decimal::ONE + input.income_growth_rate;

    let mut schedule: Vec<IsaPaymentPeriod> = Vec::with_capacity(input.payment_window_months as usize);
    let mut cumulative = Decimal::ZERO;
    let mut cap_reached = false;
    let mut months_to_cap = None;

    // Income steps once per projection year
    let mut income = input.annual_income;
    for month in 1..=input.payment_window_months {
        if month > 1 && (month - 1) % 12 == 0 {
            income = input.annual_income
                * growth_factor.powd(Decimal::from((month - 1) / 12));
        }

        let owed =
            repayment::floored_monthly_payment(income, input.income_floor, input.repayment_rate);
        let remaining = cap - cumulative;
        let payment = owed.min(remaining);
        cumulative += payment;

        schedule.push(IsaPaymentPeriod {
            month,
            annual_income: income,
            payment,
            cumulative_paid: cumulative,
            remaining_to_cap: cap - cumulative,
        });

        if cumulative >= cap {
            cap_reached = true;
            months_to_cap = Some(month);
            break;
        }
    }

    let effective_annual_cost = if cumulative.is_zero() {
        warnings.push("No payments fall inside the window; income never clears the floor".into());
        None
    } else {
        let mut cash_flows: Vec<Money> = Vec::with_capacity(schedule.len() + 1);
        cash_flows.push(-input.amount_financed);
        cash_flows.extend(schedule.iter().map(|p| p.payment));
        match time_value::periodic_irr(&cash_flows, DEFAULT_MONTHLY_GUESS) {
            Ok(monthly) => Some(monthly * MONTHS_PER_YEAR * HUNDRED),
            Err(e) => {
                warnings.push(format!("Effective cost solver warning: {e}"));
                None
            }
        }
    };

    let output = IsaProjectionOutput {
        repayment_cap: cap,
        total_repaid: cumulative,
        cap_reached,
        months_to_cap,
        effective_annual_cost,
        total_repaid_display: format::currency(cumulative),
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "ISA Payoff Projection — monthly payments under income growth, stopped at the cap",
        &serde_json::json!({
            "amount_financed": input.amount_financed.to_string(),
            "repayment_rate": input.repayment_rate.to_string(),
            "annual_income": input.annual_income.to_string(),
            "income_floor": input.income_floor.to_string(),
            "cap_multiple": input.cap_multiple.to_string(),
            "income_growth_rate": input.income_growth_rate.to_string(),
            "payment_window_months": input.payment_window_months,
        }),
        warnings,
        elapsed,
        output,
    ))
}

fn validate_projection_input(input: &IsaProjectionInput) -> IsaFinanceResult<()> {
    if input.amount_financed <= Decimal::ZERO {
        return Err(IsaFinanceError::InvalidInput {
            field: "amount_financed".into(),
            reason: "Amount financed must be positive".into(),
        });
    }
    if input.repayment_rate <= Decimal::ZERO || input.repayment_rate > Decimal::ONE {
        return Err(IsaFinanceError::InvalidInput {
            field: "repayment_rate".into(),
            reason: "Repayment rate must be between 0 (exclusive) and 1".into(),
        });
    }
    if input.annual_income < Decimal::ZERO {
        return Err(IsaFinanceError::InvalidInput {
            field: "annual_income".into(),
            reason: "Annual income cannot be negative".into(),
        });
    }
    if input.income_floor < Decimal::ZERO {
        return Err(IsaFinanceError::InvalidInput {
            field: "income_floor".into(),
            reason: "Income floor cannot be negative".into(),
        });
    }
    if input.cap_multiple < Decimal::ONE {
        return Err(IsaFinanceError::InvalidInput {
            field: "cap_multiple".into(),
            reason: "Cap multiple must be at least 1".into(),
        });
    }
    if input.income_growth_rate <= dec!(-1) {
        return Err(IsaFinanceError::InvalidInput {
            field: "income_growth_rate".into(),
            reason: "Income growth must be greater than -100%".into(),
        });
    }
    if input.payment_window_months == 0 {
        return Err(IsaFinanceError::InvalidInput {
            field: "payment_window_months".into(),
            reason: "Payment window must be at least 1 month".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn flat_income_projection() -> IsaProjectionInput {
        IsaProjectionInput {
            amount_financed: dec!(10000),
            repayment_rate: dec!(0.05),
            annual_income: dec!(60000),
            income_floor: dec!(20000),
            cap_multiple: dec!(2.0),
            income_growth_rate: dec!(0),
            payment_window_months: 120,
        }
    }

    #[test]
    fn test_flat_income_hits_cap() {
        let result = project_isa(&flat_income_projection()).unwrap();
        let out = &result.result;

        // 250/month against a 20,000 cap: exactly 80 payments
        assert_eq!(out.repayment_cap, dec!(20000));
        assert!(out.cap_reached);
        assert_eq!(out.months_to_cap, Some(80));
        assert_eq!(out.schedule.len(), 80);
        assert_eq!(out.total_repaid, dec!(20000));
        assert_eq!(out.schedule.last().unwrap().payment, dec!(250));
        assert_eq!(out.schedule.last().unwrap().remaining_to_cap, Decimal::ZERO);
    }

    #[test]
    fn test_final_payment_is_truncated_at_cap() {
        let mut input = flat_income_projection();
        // 20,000 cap with 333.33.. monthly does not divide evenly
        input.annual_income = dec!(80000);
        let result = project_isa(&input).unwrap();
        let out = &result.result;

        assert!(out.cap_reached);
        assert_eq!(out.total_repaid, dec!(20000));
        let last = out.schedule.last().unwrap();
        let regular = out.schedule.first().unwrap().payment;
        assert!(last.payment < regular, "final payment should be a remainder");
    }

    #[test]
    fn test_income_below_floor_never_pays() {
        let mut input = flat_income_projection();
        input.annual_income = dec!(15000);
        input.payment_window_months = 24;
        let result = project_isa(&input).unwrap();
        let out = &result.result;

        assert_eq!(out.schedule.len(), 24);
        assert!(out.schedule.iter().all(|p| p.payment.is_zero()));
        assert_eq!(out.total_repaid, Decimal::ZERO);
        assert!(!out.cap_reached);
        assert!(out.effective_annual_cost.is_none());
        assert!(!result.warnings.is_empty());
    }

    #[test]
    fn test_income_steps_annually_with_growth() {
        let mut input = flat_income_projection();
        input.annual_income = dec!(30000);
        input.income_floor = dec!(0);
        input.income_growth_rate = dec!(0.10);
        input.payment_window_months = 24;
        input.cap_multiple = dec!(10);
        let result = project_isa(&input).unwrap();
        let schedule = &result.result.schedule;

        // Year one: 30,000 × 5% / 12 = 125; year two: 33,000 × 5% / 12 = 137.50
        assert_eq!(schedule[0].payment, dec!(125));
        assert_eq!(schedule[11].payment, dec!(125));
        assert_eq!(schedule[12].annual_income, dec!(33000));
        assert_eq!(schedule[12].payment, dec!(137.5));
    }

    #[test]
    fn test_growth_can_lift_income_over_floor() {
        let mut input = flat_income_projection();
        input.annual_income = dec!(19000);
        input.income_floor = dec!(20000);
        input.income_growth_rate = dec!(0.10);
        input.payment_window_months = 24;
        let result = project_isa(&input).unwrap();
        let schedule = &result.result.schedule;

        assert!(schedule[11].payment.is_zero());
        // 19,000 × 1.10 = 20,900 clears the 20,000 floor in year two
        assert!(schedule[12].payment > Decimal::ZERO);
    }

    #[test]
    fn test_effective_cost_reflects_cap_premium() {
        let result = project_isa(&flat_income_projection()).unwrap();
        let cost = result.result.effective_annual_cost.unwrap();
        // Repaying 2x over ~7 years is an expensive facility
        assert!(cost > dec!(10), "expected a double-digit cost, got {cost}");
        assert!(cost < dec!(40), "cost implausibly high: {cost}");
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let mut input = flat_income_projection();
        input.payment_window_months = 0;
        assert!(project_isa(&input).is_err());

        let mut input = flat_income_projection();
        input.income_growth_rate = dec!(-1);
        assert!(project_isa(&input).is_err());

        let mut input = flat_income_projection();
        input.repayment_rate = dec!(0);
        assert!(project_isa(&input).is_err());

        let mut input = flat_income_projection();
        input.cap_multiple = dec!(0.9);
        assert!(project_isa(&input).is_err());
    }

    #[test]
    fn test_projection_is_pure() {
        let a = project_isa(&flat_income_projection()).unwrap();
        let b = project_isa(&flat_income_projection()).unwrap();
        assert_eq!(a.result.total_repaid, b.result.total_repaid);
        assert_eq!(a.result.months_to_cap, b.result.months_to_cap);
    }
}
