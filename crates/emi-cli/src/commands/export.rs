use clap::Args;
use serde_json::{json, Value};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, info};

use emi_core::amortization;

use super::loan::{resolve_loan, LoanArgs};
use crate::export::{self, ExportFormat, Report};

/// Arguments for schedule export
#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Report format
    #[arg(long, value_enum, default_value = "csv")]
    pub format: ExportFormat,

    /// Destination file; the report is printed to stdout when omitted
    #[arg(long, conflicts_with = "save")]
    pub out: Option<PathBuf>,

    /// Save under the default file name (emi_schedule.csv / emi-report.txt / emi-report.pdf)
    #[arg(long)]
    pub save: bool,
}

/// Render the report for the current input.
///
/// Returns `None` when the loan input produces no result, in which case
/// nothing is exported.
pub fn build_report(args: &ExportArgs) -> Result<Option<Vec<u8>>, Box<dyn std::error::Error>> {
    let loan = resolve_loan(&args.loan)?;
    let Some(computed) = amortization::amortization_schedule(&loan)? else {
        return Ok(None);
    };

    let report = Report {
        annual_rate_percent: loan.annual_rate_percent,
        output: &computed.result,
    };
    Ok(Some(export::render(args.format, &report)?))
}

pub fn run_export(args: ExportArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let Some(contents) = build_report(&args)? else {
        debug!("no result for loan input, nothing exported");
        return Ok(Value::Null);
    };

    let destination = match (&args.out, args.save) {
        (Some(path), _) => Some(path.clone()),
        (None, true) => Some(PathBuf::from(args.format.default_file_name())),
        (None, false) => None,
    };

    match destination {
        Some(path) => {
            fs::write(&path, &contents)
                .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))?;
            info!(path = %path.display(), bytes = contents.len(), "report written");
            Ok(json!({
                "format": format!("{:?}", args.format).to_lowercase(),
                "path": path.display().to_string(),
                "bytes": contents.len(),
            }))
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&contents)?;
            stdout.flush()?;
            Ok(Value::Null)
        }
    }
}
