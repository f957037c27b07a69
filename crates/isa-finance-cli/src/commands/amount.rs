use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use isa_finance_core::format;

/// Arguments for rounding a suggested amount
#[derive(Args)]
pub struct RoundAmountArgs {
    /// Amount to round to the nearest hundred
    #[arg(long)]
    pub amount: Decimal,
}

pub fn run_round_amount(args: RoundAmountArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rounded = format::round_hundred(args.amount);
    Ok(json!({
        "amount": args.amount.to_string(),
        "rounded": rounded.to_string(),
        "display": format::currency(rounded),
    }))
}
