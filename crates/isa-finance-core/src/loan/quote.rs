//! Loan quote envelope: validated inputs in, display-ready figures out.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::IsaFinanceError;
use crate::format;
use crate::loan::schedule::{amortization_schedule, AmortizationPeriod};
use crate::loan::{apr, payment};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::IsaFinanceResult;

const HUNDRED: Decimal = dec!(100);
const MONTHS_PER_YEAR: u32 = 12;

/// Input for a loan quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanQuoteInput {
    /// Amount financed.
    pub principal: Money,
    /// Nominal annual rate as a decimal (0.05 = 5%).
    pub annual_rate: Rate,
    /// Term in months.
    pub term_months: u32,
    /// One-time origination fees, deducted from disbursement.
    pub fees: Money,
    /// First payment date; required when a schedule is requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_payment_date: Option<NaiveDate>,
    /// Include the month-by-month amortization schedule in the output.
    #[serde(default)]
    pub include_schedule: bool,
}

/// Output of a loan quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanQuoteOutput {
    pub monthly_payment: Money,
    pub total_interest: Money,
    pub total_payment: Money,
    /// Fee-adjusted APR approximation, percent.
    pub fee_adjusted_apr: Rate,
    /// Exact Newton-solver APR, percent. None when the solver fails.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_apr: Option<Rate>,
    pub monthly_payment_display: String,
    pub apr_display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<AmortizationPeriod>>,
}

/// Quote an amortizing loan: payment, totals, both APR figures, and an
/// optional schedule.
pub fn quote_loan(input: &LoanQuoteInput) -> IsaFinanceResult<ComputationOutput<LoanQuoteOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_loan_quote_input(input)?;

    if input.annual_rate > Decimal::ONE {
        warnings.push(format!(
            "Annual rate {} is above 100%; rates are decimal fractions (0.05 = 5%)",
            input.annual_rate
        ));
    }
    if input.fees >= input.principal {
        warnings.push(format!(
            "Fees {} equal or exceed principal {}; APR figures are not meaningful",
            input.fees, input.principal
        ));
    }

    let monthly_payment = payment::monthly_payment(input.annual_rate, input.term_months, input.principal);
    let total_payment = payment::total_payment(monthly_payment, input.term_months);

    let mut total_interest = payment::total_interest(input.principal, monthly_payment, input.term_months);
    if total_interest < Decimal::ZERO {
        warnings.push(format!(
            "Computed total interest {total_interest} was negative; clamped to zero for display"
        ));
        total_interest = Decimal::ZERO;
    }

    let term_years = input.term_months.div_ceil(MONTHS_PER_YEAR);
    let fee_adjusted_apr =
        apr::fee_adjusted_apr(input.principal, input.annual_rate, term_years, input.fees);

    let effective_apr =
        match apr::effective_apr(input.principal, input.fees, monthly_payment, input.term_months) {
            Ok(rate) => Some(rate),
            Err(e) => {
                warnings.push(format!("Effective APR solver warning: {e}"));
                None
            }
        };

    let schedule = if input.include_schedule {
        // Validation guarantees the date is present here
        input.first_payment_date.map(|first| {
            amortization_schedule(input.principal, input.annual_rate, input.term_months, first)
        })
    } else {
        None
    };

    let output = LoanQuoteOutput {
        monthly_payment,
        total_interest,
        total_payment,
        fee_adjusted_apr,
        effective_apr,
        monthly_payment_display: format::currency(monthly_payment),
        apr_display: format::percent(fee_adjusted_apr / HUNDRED),
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Amortizing Loan Quote — level payment, totals, fee-adjusted and effective APR",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "annual_rate": input.annual_rate.to_string(),
            "term_months": input.term_months,
            "fees": input.fees.to_string(),
            "include_schedule": input.include_schedule,
        }),
        warnings,
        elapsed,
        output,
    ))
}

fn validate_loan_quote_input(input: &LoanQuoteInput) -> IsaFinanceResult<()> {
    if input.principal <= Decimal::ZERO {
        return Err(IsaFinanceError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if input.term_months == 0 {
        return Err(IsaFinanceError::InvalidInput {
            field: "term_months".into(),
            reason: "Term must be at least 1 month".into(),
        });
    }
    if input.annual_rate < Decimal::ZERO {
        return Err(IsaFinanceError::InvalidInput {
            field: "annual_rate".into(),
            reason: "Annual rate cannot be negative".into(),
        });
    }
    if input.fees < Decimal::ZERO {
        return Err(IsaFinanceError::InvalidInput {
            field: "fees".into(),
            reason: "Fees cannot be negative".into(),
        });
    }
    if input.include_schedule && input.first_payment_date.is_none() {
        return Err(IsaFinanceError::InvalidInput {
            field: "first_payment_date".into(),
            reason: "A first payment date is required when a schedule is requested".into(),
        });
    }
    Ok(())
}
