use std::fmt::Write;

use super::currency::{format_inr, whole};
use super::Report;

/// Plain-text report with a fixed-width schedule table.
pub fn render(report: &Report<'_>) -> String {
    let summary = &report.output.summary;
    let tenure = &report.output.tenure;

    let mut txt = String::new();
    txt.push_str("EMI CALCULATOR REPORT\n=====================\n");
    // Writing to a String cannot fail
    let _ = writeln!(txt, "Loan Amount   : {}", format_inr(summary.principal));
    let _ = writeln!(txt, "Interest Rate : {}", report.rate_label());
    let _ = writeln!(
        txt,
        "Total Tenure  : {} Years, {} Months",
        tenure.years, tenure.months
    );
    let _ = writeln!(txt, "Monthly EMI   : {}", format_inr(summary.payment));
    let _ = writeln!(txt, "Total Payment : {}", format_inr(summary.total_payment));
    let _ = writeln!(txt, "Total Interest: {}", format_inr(summary.total_interest));
    txt.push('\n');

    txt.push_str("Month | EMI       | Principal | Interest  | Outstanding\n");
    txt.push_str("------|-----------|-----------|-----------|------------\n");

    for entry in &report.output.schedule {
        let _ = writeln!(
            txt,
            "{:<5} | {:<9} | {:<9} | {:<9} | {}",
            entry.period,
            whole(entry.payment),
            whole(entry.principal_component),
            whole(entry.interest_component),
            whole(entry.remaining_balance),
        );
    }

    txt
}

#[cfg(test)]
mod tests {
    use super::*;
    use emi_core::amortization::{amortization_schedule, LoanInput};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_text_report_layout() {
        let input = LoanInput {
            principal: dec!(100000),
            annual_rate_percent: dec!(12),
            years: 1,
            months: 0,
        };
        let out = amortization_schedule(&input).unwrap().unwrap();
        let txt = render(&Report {
            annual_rate_percent: input.annual_rate_percent,
            output: &out.result,
        });

        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(
            &lines[..12],
            &[
                "EMI CALCULATOR REPORT",
                "=====================",
                "Loan Amount   : ₹1,00,000",
                "Interest Rate : 12%",
                "Total Tenure  : 1 Years, 0 Months",
                "Monthly EMI   : ₹8,885",
                "Total Payment : ₹1,06,619",
                "Total Interest: ₹6,619",
                "",
                "Month | EMI       | Principal | Interest  | Outstanding",
                "------|-----------|-----------|-----------|------------",
                "1     | 8885      | 7885      | 1000      | 92115",
            ]
        );
        assert_eq!(lines.len(), 11 + 12);
        assert!(lines[22].starts_with("12    | "));
        assert!(lines[22].ends_with(" | 0"));
    }
}
