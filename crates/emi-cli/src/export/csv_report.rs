use super::currency::fixed;
use super::Report;

const HEADER: [&str; 5] = [
    "Month",
    "Monthly EMI",
    "Principal Component",
    "Interest Component",
    "Outstanding Balance",
];

/// CSV report: a key/value preamble, a blank line, then one row per period.
pub fn render(report: &Report<'_>) -> Result<String, Box<dyn std::error::Error>> {
    let summary = &report.output.summary;
    let tenure = &report.output.tenure;

    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());
    wtr.write_record(["EMI REPORT DETAILS"])?;
    wtr.write_record(["Loan Amount", &summary.principal.normalize().to_string()])?;
    wtr.write_record(["Interest Rate", &report.rate_label()])?;
    wtr.write_record([
        "Tenure",
        &format!("{} Years {} Months", tenure.years, tenure.months),
    ])?;
    wtr.write_record(["Monthly EMI", &fixed(summary.payment, 2)])?;
    wtr.write_record(["Total Interest", &fixed(summary.total_interest, 2)])?;

    let mut buf = wtr.into_inner().map_err(|e| e.into_error())?;
    buf.push(b'\n');

    let mut wtr = csv::Writer::from_writer(buf);
    wtr.write_record(HEADER)?;
    for entry in &report.output.schedule {
        wtr.write_record([
            entry.period.to_string(),
            fixed(entry.payment, 2),
            fixed(entry.principal_component, 2),
            fixed(entry.interest_component, 2),
            fixed(entry.remaining_balance, 2),
        ])?;
    }

    let buf = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(buf)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use emi_core::amortization::{amortization_schedule, LoanInput};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_zero_rate_csv() {
        let input = LoanInput {
            principal: dec!(1200),
            annual_rate_percent: dec!(0),
            years: 1,
            months: 0,
        };
        let out = amortization_schedule(&input).unwrap().unwrap();
        let csv = render(&Report {
            annual_rate_percent: input.annual_rate_percent,
            output: &out.result,
        })
        .unwrap();

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            &lines[..9],
            &[
                "EMI REPORT DETAILS",
                "Loan Amount,1200",
                "Interest Rate,0%",
                "Tenure,1 Years 0 Months",
                "Monthly EMI,100.00",
                "Total Interest,0.00",
                "",
                "Month,Monthly EMI,Principal Component,Interest Component,Outstanding Balance",
                "1,100.00,100.00,0.00,1100.00",
            ]
        );
        assert_eq!(lines.len(), 8 + 12);
        assert_eq!(lines[19], "12,100.00,100.00,0.00,0.00");
    }

    #[test]
    fn test_standard_csv_first_row() {
        let input = LoanInput {
            principal: dec!(100000),
            annual_rate_percent: dec!(12.0),
            years: 0,
            months: 12,
        };
        let out = amortization_schedule(&input).unwrap().unwrap();
        let csv = render(&Report {
            annual_rate_percent: input.annual_rate_percent,
            output: &out.result,
        })
        .unwrap();

        assert!(csv.contains("Interest Rate,12%\n"));
        assert!(csv.contains("Tenure,1 Years 0 Months\n"));
        assert!(csv.contains("Monthly EMI,8884.88\n"));
        assert!(csv.contains("\n1,8884.88,7884.88,1000.00,92115.12\n"));
    }
}
