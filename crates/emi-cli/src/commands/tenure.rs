use clap::Args;
use serde_json::Value;

use emi_core::tenure;

use crate::input::lenient::lenient_int;

/// Arguments for tenure normalization
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct TenureArgs {
    /// Tenure years
    #[arg(long, value_parser = lenient_int, default_value = "0")]
    pub years: i64,

    /// Tenure months
    #[arg(long, value_parser = lenient_int, default_value = "0")]
    pub months: i64,
}

pub fn run_tenure(args: TenureArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let result = tenure::normalize_tenure(args.years, args.months);
    Ok(serde_json::to_value(result)?)
}
