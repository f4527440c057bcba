pub mod csv_report;
pub mod currency;
pub mod pdf_report;
pub mod text_report;

use clap::ValueEnum;
use emi_core::amortization::ScheduleOutput;
use rust_decimal::Decimal;

/// Serialisations of a computed schedule.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Txt,
    Pdf,
}

impl ExportFormat {
    /// File name used when saving without an explicit path.
    pub fn default_file_name(self) -> &'static str {
        match self {
            ExportFormat::Csv => "emi_schedule.csv",
            ExportFormat::Txt => "emi-report.txt",
            ExportFormat::Pdf => "emi-report.pdf",
        }
    }
}

/// Everything a report needs: the rate as the user typed it and a fresh
/// computation.
pub struct Report<'a> {
    pub annual_rate_percent: Decimal,
    pub output: &'a ScheduleOutput,
}

impl Report<'_> {
    fn rate_label(&self) -> String {
        format!("{}%", self.annual_rate_percent.normalize())
    }
}

/// Render a report in the requested format.
pub fn render(format: ExportFormat, report: &Report<'_>) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    match format {
        ExportFormat::Csv => Ok(csv_report::render(report)?.into_bytes()),
        ExportFormat::Txt => Ok(text_report::render(report).into_bytes()),
        ExportFormat::Pdf => pdf_report::render(report),
    }
}
