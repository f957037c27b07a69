use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use isa_finance_core::loan::quote::{self, LoanQuoteInput};
use isa_finance_core::loan::schedule;

use crate::input;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Arguments for a loan quote
#[derive(Args)]
pub struct LoanQuoteArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount financed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Nominal annual rate as a decimal (0.05 = 5%)
    #[arg(long, alias = "rate")]
    pub annual_rate: Option<Decimal>,

    /// Term in months
    #[arg(long, conflicts_with = "term_years")]
    pub term_months: Option<u32>,

    /// Term in years
    #[arg(long)]
    pub term_years: Option<u32>,

    /// One-time origination fees
    #[arg(long)]
    pub fees: Option<Decimal>,

    /// Include the amortization schedule in the output
    #[arg(long)]
    pub schedule: bool,

    /// First payment date, YYYY-MM-DD (required with --schedule)
    #[arg(long)]
    pub first_payment: Option<String>,
}

/// Arguments for an amortization schedule
#[derive(Args)]
pub struct AmortizationArgs {
    /// Amount financed
    #[arg(long)]
    pub principal: Decimal,

    /// Nominal annual rate as a decimal (0.05 = 5%)
    #[arg(long, alias = "rate")]
    pub annual_rate: Decimal,

    /// Term in months
    #[arg(long, conflicts_with = "term_years")]
    pub term_months: Option<u32>,

    /// Term in years
    #[arg(long)]
    pub term_years: Option<u32>,

    /// First payment date, YYYY-MM-DD
    #[arg(long)]
    pub first_payment: String,
}

pub fn run_loan_quote(args: LoanQuoteArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let quote_input: LoanQuoteInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        LoanQuoteInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate: args
                .annual_rate
                .ok_or("--annual-rate is required (or provide --input)")?,
            term_months: resolve_term(args.term_months, args.term_years)?,
            fees: args.fees.unwrap_or(Decimal::ZERO),
            first_payment_date: args
                .first_payment
                .as_deref()
                .map(parse_date)
                .transpose()?,
            include_schedule: args.schedule,
        }
    };

    let result = quote::quote_loan(&quote_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_amortization(args: AmortizationArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let term_months = resolve_term(args.term_months, args.term_years)?;
    let first_payment = parse_date(&args.first_payment)?;

    let rows = schedule::amortization_schedule(
        args.principal,
        args.annual_rate,
        term_months,
        first_payment,
    );
    Ok(serde_json::to_value(rows)?)
}

fn resolve_term(
    term_months: Option<u32>,
    term_years: Option<u32>,
) -> Result<u32, Box<dyn std::error::Error>> {
    match (term_months, term_years) {
        (Some(months), _) => Ok(months),
        (None, Some(years)) => Ok(years * 12),
        (None, None) => Err("--term-months or --term-years is required".into()),
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|_| format!("Invalid date '{s}', expected YYYY-MM-DD").into())
}
