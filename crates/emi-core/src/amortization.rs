//! Equated monthly installment (EMI) and amortization schedule.
//!
//! The payment follows the fixed-payment annuity formula
//! `P * r * (1 + r)^n / ((1 + r)^n - 1)` with `r` the monthly rate, falling
//! back to straight-line repayment when the rate is zero. The schedule is
//! generated period by period on the running balance; the final period
//! repays whatever balance is left so the loan always closes at exactly zero.
//!
//! Intermediate values are never rounded. Rounding is a presentation concern.

use std::time::Instant;

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::EmiError;
use crate::split::{payment_split, PaymentSplit};
use crate::tenure::{self, NormalizedTenure, MONTHS_PER_YEAR, TENURE_WARNING};
use crate::types::*;
use crate::EmiResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const PERCENT: Decimal = dec!(100);

/// Realistic upper bound on tenure (100 years). Longer tenures are still
/// computed, but the envelope API flags them and schedules only preallocate
/// this many entries.
pub const MAX_TENURE_MONTHS: u32 = 1200;

pub const LONG_TENURE_WARNING: &str =
    "Tenure exceeds 100 years; the schedule grows linearly with the number of months";

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Loan parameters as entered by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    /// Amount borrowed
    pub principal: Money,
    /// Nominal annual interest rate in percent (12 = 12% p.a.)
    pub annual_rate_percent: Percent,
    /// Tenure years, not yet normalized
    #[serde(default)]
    pub years: i64,
    /// Tenure months, not yet normalized
    #[serde(default)]
    pub months: i64,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One completed EMI computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSummary {
    pub principal: Money,
    pub monthly_rate: Rate,
    pub total_months: u32,
    pub payment: Money,
    pub total_interest: Money,
    pub total_payment: Money,
}

/// A single period of the amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// 1-based period index
    pub period: u32,
    pub payment: Money,
    pub principal_component: Money,
    pub interest_component: Money,
    /// Outstanding balance after this period, never negative
    pub remaining_balance: Money,
}

/// Summary view: what the calculator shows next to its chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiOutput {
    pub tenure: NormalizedTenure,
    pub summary: AmortizationSummary,
    pub split: PaymentSplit,
}

/// Full schedule view used for tables and exports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOutput {
    pub tenure: NormalizedTenure,
    pub summary: AmortizationSummary,
    pub schedule: Vec<ScheduleEntry>,
}

// ---------------------------------------------------------------------------
// Core engine
// ---------------------------------------------------------------------------

/// Compute the EMI summary for a loan.
///
/// Returns `None` when there is nothing to compute: non-positive principal,
/// non-positive tenure, or a negative rate. Principals near the top of
/// decimal range whose totals overflow are also declined.
pub fn compute(
    principal: Money,
    annual_rate_percent: Percent,
    total_months: i64,
) -> Option<AmortizationSummary> {
    checked_compute(principal, annual_rate_percent, total_months).unwrap_or_else(|e| {
        warn!(error = %e, "EMI computation declined");
        None
    })
}

/// Like [`compute`], but reports arithmetic failures instead of folding
/// them into "no result".
pub fn checked_compute(
    principal: Money,
    annual_rate_percent: Percent,
    total_months: i64,
) -> EmiResult<Option<AmortizationSummary>> {
    if principal <= Decimal::ZERO || total_months <= 0 || annual_rate_percent < Decimal::ZERO {
        debug!(%principal, %annual_rate_percent, total_months, "no result for loan input");
        return Ok(None);
    }

    let n = u32::try_from(total_months).map_err(|_| EmiError::InvalidInput {
        field: "total_months".into(),
        reason: format!("{total_months} months exceeds the supported range"),
    })?;
    let periods = Decimal::from(n);

    let monthly_rate = annual_rate_percent / Decimal::from(MONTHS_PER_YEAR) / PERCENT;

    let payment = if monthly_rate.is_zero() {
        principal / periods
    } else {
        annuity_payment(principal, monthly_rate, n)?
    };

    let total_payment = payment
        .checked_mul(periods)
        .ok_or_else(|| EmiError::Overflow {
            context: "total payment".into(),
        })?;
    let total_interest = total_payment - principal;

    debug!(%payment, %total_payment, total_months = n, "EMI computed");

    Ok(Some(AmortizationSummary {
        principal,
        monthly_rate,
        total_months: n,
        payment,
        total_interest,
        total_payment,
    }))
}

/// Fixed payment that amortizes `principal` over `n` periods at `rate`.
fn annuity_payment(principal: Money, rate: Rate, n: u32) -> EmiResult<Money> {
    let Some(ratio) = annuity_ratio(rate, n) else {
        // (1 + r) rounds to 1 in decimal precision: no effective interest
        return Ok(principal / Decimal::from(n));
    };

    principal
        .checked_mul(rate)
        .and_then(|v| v.checked_mul(ratio))
        .ok_or_else(|| EmiError::Overflow {
            context: "EMI payment".into(),
        })
}

/// `(1+r)^n / ((1+r)^n - 1)`, or `None` when the annuity factor vanishes.
///
/// Once `(1+r)^n` leaves decimal range the ratio is 1 to within 28
/// significant digits, so the payment degenerates to interest only (`P * r`).
fn annuity_ratio(rate: Rate, n: u32) -> Option<Decimal> {
    let Some(growth) = (Decimal::ONE + rate).checked_powu(u64::from(n)) else {
        debug!(%rate, n, "growth factor out of decimal range, using interest-only ratio");
        return Some(Decimal::ONE);
    };

    let annuity_factor = growth - Decimal::ONE;
    if annuity_factor.is_zero() {
        return None;
    }

    // growth / annuity_factor stays close to 1, so dividing first keeps the
    // product inside decimal range for long tenures
    Some(growth / annuity_factor)
}

/// Entries preallocated for a schedule of `n` periods.
fn initial_capacity(n: u32) -> usize {
    n.min(MAX_TENURE_MONTHS) as usize
}

/// Period-by-period breakdown of a computed loan.
///
/// Always yields exactly `summary.total_months` entries. The last entry's
/// principal component equals the balance carried into it, and its payment
/// absorbs any drift accumulated by the earlier periods.
///
/// Memory is linear in the tenure. Realistic loans stay within
/// [`MAX_TENURE_MONTHS`]; callers accepting arbitrary tenures should bound
/// them before asking for a schedule.
pub fn build_schedule(summary: &AmortizationSummary) -> Vec<ScheduleEntry> {
    let n = summary.total_months;
    let mut schedule = Vec::with_capacity(initial_capacity(n));
    let mut balance = summary.principal;

    for period in 1..=n {
        let interest_component = balance * summary.monthly_rate;

        let (payment, principal_component) = if period == n {
            (balance + interest_component, balance)
        } else {
            (summary.payment, summary.payment - interest_component)
        };

        if period == n {
            balance = Decimal::ZERO;
        } else {
            balance -= principal_component;
        }

        schedule.push(ScheduleEntry {
            period,
            payment,
            principal_component,
            interest_component,
            remaining_balance: balance.max(Decimal::ZERO),
        });
    }

    schedule
}

// ---------------------------------------------------------------------------
// Envelope API
// ---------------------------------------------------------------------------

struct Prepared {
    tenure: NormalizedTenure,
    summary: AmortizationSummary,
    warnings: Vec<String>,
}

fn prepare(input: &LoanInput) -> EmiResult<Option<Prepared>> {
    if input.annual_rate_percent < Decimal::ZERO {
        return Err(EmiError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }

    let mut warnings = Vec::new();
    let (tenure, corrected) = tenure::normalize(input.years, input.months);
    if corrected {
        warnings.push(TENURE_WARNING.to_string());
    }

    if tenure.total_months > MAX_TENURE_MONTHS {
        warn!(total_months = tenure.total_months, "unusually long tenure");
        warnings.push(LONG_TENURE_WARNING.to_string());
    }

    let summary = checked_compute(
        input.principal,
        input.annual_rate_percent,
        i64::from(tenure.total_months),
    )?;

    Ok(summary.map(|summary| Prepared {
        tenure,
        summary,
        warnings,
    }))
}

fn assumptions(input: &LoanInput, tenure: &NormalizedTenure) -> serde_json::Value {
    serde_json::json!({
        "principal": input.principal.to_string(),
        "annual_rate_percent": input.annual_rate_percent.to_string(),
        "years": tenure.years,
        "months": tenure.months,
    })
}

/// Normalize tenure, compute the EMI and the principal/interest split.
///
/// `Ok(None)` is the designed no-op for incomplete input.
pub fn calculate_emi(input: &LoanInput) -> EmiResult<Option<ComputationOutput<EmiOutput>>> {
    let start = Instant::now();

    let Some(prepared) = prepare(input)? else {
        return Ok(None);
    };

    let output = EmiOutput {
        tenure: prepared.tenure,
        split: payment_split(&prepared.summary),
        summary: prepared.summary,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(Some(with_metadata(
        "Fixed-payment annuity (EMI)",
        &assumptions(input, &prepared.tenure),
        prepared.warnings,
        elapsed,
        output,
    )))
}

/// Normalize tenure, compute the EMI and the full amortization schedule.
pub fn amortization_schedule(
    input: &LoanInput,
) -> EmiResult<Option<ComputationOutput<ScheduleOutput>>> {
    let start = Instant::now();

    let Some(prepared) = prepare(input)? else {
        return Ok(None);
    };

    let output = ScheduleOutput {
        tenure: prepared.tenure,
        schedule: build_schedule(&prepared.summary),
        summary: prepared.summary,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(Some(with_metadata(
        "Amortization schedule (final-period balance correction)",
        &assumptions(input, &prepared.tenure),
        prepared.warnings,
        elapsed,
        output,
    )))
}
