//! ISA quote envelope: the current-income monthly figure and the cap.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::IsaFinanceError;
use crate::format;
use crate::isa::repayment;
use crate::types::{with_metadata, ComputationOutput, Money, Multiple, Rate};
use crate::IsaFinanceResult;

/// Cap multiples outside this band are legal but unusual.
const TYPICAL_CAP_CEILING: Decimal = dec!(3);

/// Input for an ISA quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsaQuoteInput {
    /// Borrower's current annual income.
    pub annual_income: Money,
    /// Share of income owed, as a decimal (0.05 = 5%).
    pub repayment_rate: Rate,
    /// Income at or below this level owes nothing.
    pub income_floor: Money,
    /// Amount financed.
    pub amount_financed: Money,
    /// Repayment cap as a multiple of the amount financed.
    pub cap_multiple: Multiple,
}

/// Output of an ISA quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsaQuoteOutput {
    pub monthly_payment: Money,
    pub repayment_cap: Money,
    /// True when current income is at or below the floor.
    pub below_floor: bool,
    pub monthly_payment_display: String,
    pub repayment_cap_display: String,
}

/// Quote an ISA at the borrower's current income.
pub fn quote_isa(input: &IsaQuoteInput) -> IsaFinanceResult<ComputationOutput<IsaQuoteOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_isa_quote_input(input)?;

    if input.cap_multiple > TYPICAL_CAP_CEILING {
        warnings.push(format!(
            "Cap multiple {} is above the usual 2.0–3.0 band",
            input.cap_multiple
        ));
    }

    let monthly_payment = repayment::floored_monthly_payment(
        input.annual_income,
        input.income_floor,
        input.repayment_rate,
    );
    let repayment_cap = repayment::repayment_cap(input.amount_financed, input.cap_multiple);
    let below_floor = input.annual_income <= input.income_floor;

    let output = IsaQuoteOutput {
        monthly_payment,
        repayment_cap,
        below_floor,
        monthly_payment_display: format::currency(monthly_payment),
        repayment_cap_display: format::currency(repayment_cap),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "ISA Quote — floored monthly share of income and repayment cap",
        &serde_json::json!({
            "annual_income": input.annual_income.to_string(),
            "repayment_rate": input.repayment_rate.to_string(),
            "income_floor": input.income_floor.to_string(),
            "amount_financed": input.amount_financed.to_string(),
            "cap_multiple": input.cap_multiple.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

fn validate_isa_quote_input(input: &IsaQuoteInput) -> IsaFinanceResult<()> {
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
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn standard_quote() -> IsaQuoteInput {
        IsaQuoteInput {
            annual_income: dec!(60000),
            repayment_rate: dec!(0.05),
            income_floor: dec!(20000),
            amount_financed: dec!(10000),
            cap_multiple: dec!(2.0),
        }
    }

    #[test]
    fn test_quote_above_floor() {
        let result = quote_isa(&standard_quote()).unwrap();
        let out = &result.result;
        assert_eq!(out.monthly_payment, dec!(250));
        assert_eq!(out.repayment_cap, dec!(20000));
        assert!(!out.below_floor);
        assert_eq!(out.monthly_payment_display, "$250");
        assert_eq!(out.repayment_cap_display, "$20,000");
    }

    #[test]
    fn test_quote_below_floor_owes_nothing() {
        let mut input = standard_quote();
        input.annual_income = dec!(18000);
        let result = quote_isa(&input).unwrap();
        let out = &result.result;
        assert_eq!(out.monthly_payment, Decimal::ZERO);
        assert!(out.below_floor);
        assert_eq!(out.monthly_payment_display, "$0");
    }

    #[test]
    fn test_unusual_cap_multiple_warns() {
        let mut input = standard_quote();
        input.cap_multiple = dec!(4.0);
        let result = quote_isa(&input).unwrap();
        assert!(!result.warnings.is_empty());
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let mut input = standard_quote();
        input.amount_financed = dec!(0);
        assert!(quote_isa(&input).is_err());

        let mut input = standard_quote();
        input.repayment_rate = dec!(0);
        assert!(quote_isa(&input).is_err());

        let mut input = standard_quote();
        input.repayment_rate = dec!(1.5);
        assert!(quote_isa(&input).is_err());

        let mut input = standard_quote();
        input.annual_income = dec!(-1);
        assert!(quote_isa(&input).is_err());

        let mut input = standard_quote();
        input.cap_multiple = dec!(0.5);
        assert!(quote_isa(&input).is_err());
    }
}
