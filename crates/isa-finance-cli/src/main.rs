mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::amount::RoundAmountArgs;
use commands::isa::{IsaProjectionArgs, IsaQuoteArgs};
use commands::loan::{AmortizationArgs, LoanQuoteArgs};

/// Income-share-agreement and loan calculations
#[derive(Parser)]
#[command(
    name = "isafin",
    version,
    about = "Income-share-agreement and loan calculations",
    long_about = "A CLI for quoting income-share agreements and amortizing loans \
                  with decimal precision. Supports loan quotes with fee-adjusted \
                  and effective APR, amortization schedules, ISA quotes with income \
                  floors, and ISA payoff projections to the repayment cap."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Quote an amortizing loan (payment, totals, APR)
    LoanQuote(LoanQuoteArgs),
    /// Month-by-month amortization schedule
    Amortization(AmortizationArgs),
    /// Quote an ISA at the borrower's current income
    IsaQuote(IsaQuoteArgs),
    /// Project ISA payments to the repayment cap
    IsaProjection(IsaProjectionArgs),
    /// Round an amount to the nearest hundred
    RoundAmount(RoundAmountArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::LoanQuote(args) => commands::loan::run_loan_quote(args),
        Commands::Amortization(args) => commands::loan::run_amortization(args),
        Commands::IsaQuote(args) => commands::isa::run_isa_quote(args),
        Commands::IsaProjection(args) => commands::isa::run_isa_projection(args),
        Commands::RoundAmount(args) => commands::amount::run_round_amount(args),
        Commands::Version => {
            println!("isafin {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
