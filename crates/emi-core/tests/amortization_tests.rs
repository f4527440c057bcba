use emi_core::amortization::{self, LoanInput};
use emi_core::tenure;
use emi_core::EmiError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Schedule shape
// ===========================================================================

#[test]
fn test_schedule_length_and_closing_balance_across_loans() {
    let loans = [
        (dec!(100000), dec!(12), 12),
        (dec!(2500000), dec!(8.75), 240),
        (dec!(500000), dec!(10.5), 60),
        (dec!(75000), dec!(0), 7),
        (dec!(1), dec!(36), 1),
        (dec!(3000000), dec!(6.9), 360),
    ];

    for (principal, rate, months) in loans {
        let summary = amortization::compute(principal, rate, months).unwrap();
        let schedule = amortization::build_schedule(&summary);

        assert_eq!(schedule.len(), months as usize);
        for (i, entry) in schedule.iter().enumerate() {
            assert_eq!(entry.period, i as u32 + 1);
            assert!(entry.remaining_balance >= Decimal::ZERO);
        }
        assert_eq!(schedule.last().unwrap().remaining_balance, Decimal::ZERO);

        let principal_paid: Decimal = schedule.iter().map(|e| e.principal_component).sum();
        assert!(
            (principal_paid - principal).abs() < dec!(0.000001),
            "principal {principal} at {rate}% over {months}: repaid {principal_paid}",
        );
    }
}

#[test]
fn test_balances_decrease_monotonically() {
    let summary = amortization::compute(dec!(500000), dec!(10.5), 60).unwrap();
    let schedule = amortization::build_schedule(&summary);
    for pair in schedule.windows(2) {
        assert!(pair[1].remaining_balance < pair[0].remaining_balance);
        // Interest share falls as the balance is paid down
        assert!(pair[1].interest_component < pair[0].interest_component);
    }
}

#[test]
fn test_zero_rate_schedule() {
    let summary = amortization::compute(dec!(1200), Decimal::ZERO, 12).unwrap();
    assert_eq!(summary.payment, dec!(100));
    assert_eq!(summary.total_interest, Decimal::ZERO);

    let schedule = amortization::build_schedule(&summary);
    for entry in &schedule {
        assert_eq!(entry.principal_component, dec!(100));
        assert_eq!(entry.interest_component, Decimal::ZERO);
        assert_eq!(entry.payment, dec!(100));
    }
    assert_eq!(schedule[5].remaining_balance, dec!(600));
}

#[test]
fn test_total_interest_matches_schedule() {
    let summary = amortization::compute(dec!(2500000), dec!(8.75), 240).unwrap();
    let schedule = amortization::build_schedule(&summary);
    let interest_paid: Decimal = schedule.iter().map(|e| e.interest_component).sum();
    assert!((interest_paid - summary.total_interest).abs() < dec!(0.01));
}

// ===========================================================================
// End-to-end through the envelope API
// ===========================================================================

#[test]
fn test_tenure_rollover_feeds_engine() {
    let rolled = LoanInput {
        principal: dec!(300000),
        annual_rate_percent: dec!(9),
        years: 4,
        months: 12,
    };
    let plain = LoanInput {
        years: 5,
        months: 0,
        ..rolled.clone()
    };

    let a = amortization::calculate_emi(&rolled).unwrap().unwrap();
    let b = amortization::calculate_emi(&plain).unwrap().unwrap();
    assert_eq!(a.result.tenure, b.result.tenure);
    assert_eq!(a.result.summary, b.result.summary);
    assert!(a.warnings.is_empty());
}

#[test]
fn test_out_of_range_months_warns_and_clamps() {
    let input = LoanInput {
        principal: dec!(300000),
        annual_rate_percent: dec!(9),
        years: 2,
        months: 40,
    };
    let out = amortization::amortization_schedule(&input).unwrap().unwrap();
    assert_eq!(out.result.tenure.months, 11);
    assert_eq!(out.result.schedule.len(), 35);
    assert_eq!(out.warnings, vec![tenure::TENURE_WARNING.to_string()]);
}

#[test]
fn test_incomplete_input_is_a_no_op() {
    let input = LoanInput {
        principal: dec!(0),
        annual_rate_percent: dec!(9),
        years: 2,
        months: 0,
    };
    assert!(amortization::calculate_emi(&input).unwrap().is_none());
    assert!(amortization::amortization_schedule(&input).unwrap().is_none());
}

#[test]
fn test_negative_rate_is_an_error() {
    let input = LoanInput {
        principal: dec!(1000),
        annual_rate_percent: dec!(-0.5),
        years: 1,
        months: 0,
    };
    match amortization::calculate_emi(&input) {
        Err(EmiError::InvalidInput { field, .. }) => assert_eq!(field, "annual_rate_percent"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_loan_input_from_json_defaults_tenure_parts() {
    let input: LoanInput =
        serde_json::from_str(r#"{ "principal": "100000", "annual_rate_percent": "12", "years": 1 }"#)
            .unwrap();
    assert_eq!(input.months, 0);
    let out = amortization::calculate_emi(&input).unwrap().unwrap();
    assert!((out.result.summary.payment - dec!(8884.88)).abs() < dec!(0.01));
}
