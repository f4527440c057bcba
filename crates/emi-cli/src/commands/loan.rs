use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use emi_core::amortization::{self, LoanInput};

use crate::input;
use crate::input::lenient::{lenient_decimal, lenient_int};

/// Loan parameters shared by every calculator command
#[derive(Args, Clone)]
#[command(allow_hyphen_values = true)]
pub struct LoanArgs {
    /// Loan amount (principal)
    #[arg(long, alias = "principal", value_parser = lenient_decimal)]
    pub amount: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 8.5 for 8.5% p.a.)
    #[arg(long, value_parser = lenient_decimal)]
    pub rate: Option<Decimal>,

    /// Tenure years
    #[arg(long, value_parser = lenient_int, default_value = "0")]
    pub years: i64,

    /// Tenure months (12 rolls into a year, above 12 is clamped to 11)
    #[arg(long, value_parser = lenient_int, default_value = "0")]
    pub months: i64,

    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Resolve loan input from a file, piped stdin, or flags, in that order.
pub fn resolve_loan(args: &LoanArgs) -> Result<LoanInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_input(path);
    }
    if args.amount.is_none() && args.rate.is_none() {
        if let Some(loan) = input::stdin::read_stdin()? {
            return Ok(loan);
        }
    }
    Ok(LoanInput {
        principal: args
            .amount
            .ok_or("--amount is required (or provide --input)")?,
        annual_rate_percent: args.rate.unwrap_or(Decimal::ZERO),
        years: args.years,
        months: args.months,
    })
}

pub fn run_calculate(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = resolve_loan(&args)?;
    match amortization::calculate_emi(&loan)? {
        Some(result) => Ok(serde_json::to_value(result)?),
        None => Ok(Value::Null),
    }
}

pub fn run_schedule(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = resolve_loan(&args)?;
    match amortization::amortization_schedule(&loan)? {
        Some(result) => Ok(serde_json::to_value(result)?),
        None => Ok(Value::Null),
    }
}
