use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::AmortizationSummary;
use crate::types::Money;

/// Two-slice breakdown of everything paid over the loan: principal vs interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSplit {
    pub principal: Money,
    pub interest: Money,
    /// Share of total payment, percent to one decimal place
    pub principal_share_pct: Decimal,
    pub interest_share_pct: Decimal,
}

pub fn payment_split(summary: &AmortizationSummary) -> PaymentSplit {
    let principal = summary.principal;
    let interest = summary.total_interest;
    let total = principal + interest;

    PaymentSplit {
        principal,
        interest,
        principal_share_pct: share(principal, total),
        interest_share_pct: share(interest, total),
    }
}

fn share(part: Money, total: Money) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    (part / total * dec!(100)).round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}
