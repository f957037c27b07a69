use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use isa_finance_core::isa::projection::{self, IsaProjectionInput};
use isa_finance_core::isa::quote::{self, IsaQuoteInput};

use crate::input;

/// Arguments for an ISA quote
#[derive(Args)]
pub struct IsaQuoteArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Borrower's current annual income
    #[arg(long, alias = "income")]
    pub annual_income: Option<Decimal>,

    /// Share of income owed, as a decimal (0.05 = 5%)
    #[arg(long, alias = "rate")]
    pub repayment_rate: Option<Decimal>,

    /// Income at or below this level owes nothing
    #[arg(long, alias = "floor")]
    pub income_floor: Option<Decimal>,

    /// Amount financed
    #[arg(long)]
    pub amount_financed: Option<Decimal>,

    /// Repayment cap as a multiple of the amount financed
    #[arg(long, alias = "cap")]
    pub cap_multiple: Option<Decimal>,
}

/// Arguments for an ISA payoff projection
#[derive(Args)]
pub struct IsaProjectionArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_isa_quote(args: IsaQuoteArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let quote_input: IsaQuoteInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        IsaQuoteInput {
            annual_income: args
                .annual_income
                .ok_or("--annual-income is required (or provide --input)")?,
            repayment_rate: args
                .repayment_rate
                .ok_or("--repayment-rate is required (or provide --input)")?,
            income_floor: args.income_floor.unwrap_or(Decimal::ZERO),
            amount_financed: args
                .amount_financed
                .ok_or("--amount-financed is required (or provide --input)")?,
            cap_multiple: args
                .cap_multiple
                .ok_or("--cap-multiple is required (or provide --input)")?,
        }
    };

    let result = quote::quote_isa(&quote_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_isa_projection(args: IsaProjectionArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let projection_input: IsaProjectionInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for ISA projection".into());
    };

    let result = projection::project_isa(&projection_input)?;
    Ok(serde_json::to_value(result)?)
}
