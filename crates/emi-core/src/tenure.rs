//! Loan tenure normalization.
//!
//! A tenure is typed as whole years plus months. Twelve months roll into a
//! year; anything above twelve is clamped to eleven and flagged so the
//! caller can show a short-lived notice. Negative parts are clamped to zero.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const MONTHS_PER_YEAR: u32 = 12;

/// Largest month value kept after an out-of-range correction.
const MAX_MONTHS: u32 = MONTHS_PER_YEAR - 1;

/// Keeps `years * 12 + months` inside `u32`.
const MAX_YEARS: u32 = (u32::MAX - MAX_MONTHS) / MONTHS_PER_YEAR;

/// How long a presentation layer should keep the correction notice visible.
pub const TENURE_WARNING_DISPLAY: Duration = Duration::from_secs(3);

pub const TENURE_WARNING: &str = "Months must be between 0 and 11; value auto-corrected to 11";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Canonical tenure: `months` is always in `0..=11`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedTenure {
    pub years: u32,
    pub months: u32,
    pub total_months: u32,
}

impl NormalizedTenure {
    fn new(years: u32, months: u32) -> Self {
        Self {
            years,
            months,
            total_months: years * MONTHS_PER_YEAR + months,
        }
    }
}

/// Serializable outcome of a normalization, used by the shells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenureOutput {
    pub tenure: NormalizedTenure,
    pub warning: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// How long to keep the notice on screen, in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice_ms: Option<u64>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Canonicalize a raw (years, months) pair.
///
/// Returns the normalized tenure and whether months were out of range and
/// had to be clamped. Already-normalized input passes through unchanged
/// with no warning.
pub fn normalize(years: i64, months: i64) -> (NormalizedTenure, bool) {
    let mut years = years;
    let mut warning = false;

    let months = if months == i64::from(MONTHS_PER_YEAR) {
        years = years.saturating_add(1);
        0
    } else if months > i64::from(MONTHS_PER_YEAR) {
        warning = true;
        MAX_MONTHS
    } else {
        // below twelve here, so the cast is lossless
        months.max(0) as u32
    };

    let years = u32::try_from(years.max(0)).unwrap_or(u32::MAX).min(MAX_YEARS);

    if warning {
        warn!(years, months, "tenure months out of range, clamped");
    }

    (NormalizedTenure::new(years, months), warning)
}

/// Normalize and wrap the result for serialization.
pub fn normalize_tenure(years: i64, months: i64) -> TenureOutput {
    let (tenure, warning) = normalize(years, months);
    TenureOutput {
        tenure,
        warning,
        message: warning.then(|| TENURE_WARNING.to_string()),
        notice_ms: warning.then(|| TENURE_WARNING_DISPLAY.as_millis() as u64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_passthrough() {
        let (t, warn) = normalize(5, 6);
        assert_eq!(t, NormalizedTenure { years: 5, months: 6, total_months: 66 });
        assert!(!warn);
    }

    #[test]
    fn test_twelve_months_rolls_into_year() {
        let (t, warn) = normalize(2, 12);
        assert_eq!(t.years, 3);
        assert_eq!(t.months, 0);
        assert_eq!(t.total_months, 36);
        assert!(!warn);
    }

    #[test]
    fn test_twelve_months_matches_next_year() {
        for y in 0..40 {
            assert_eq!(normalize(y, 12), normalize(y + 1, 0));
        }
    }

    #[test]
    fn test_thirteen_months_clamped_with_warning() {
        let (t, warn) = normalize(4, 13);
        assert_eq!(t, NormalizedTenure { years: 4, months: 11, total_months: 59 });
        assert!(warn);
    }

    #[test]
    fn test_large_months_clamped_with_warning() {
        let (t, warn) = normalize(0, 250);
        assert_eq!(t.months, 11);
        assert_eq!(t.total_months, 11);
        assert!(warn);
    }

    #[test]
    fn test_negative_years_clamped() {
        let (t, warn) = normalize(-3, 4);
        assert_eq!(t.years, 0);
        assert_eq!(t.total_months, 4);
        assert!(!warn);
    }

    #[test]
    fn test_negative_years_with_twelve_months() {
        let (t, _) = normalize(-1, 12);
        assert_eq!(t.years, 0);
        assert_eq!(t.months, 0);
        assert_eq!(t.total_months, 0);
    }

    #[test]
    fn test_negative_months_clamped_to_zero() {
        let (t, warn) = normalize(1, -5);
        assert_eq!(t.months, 0);
        assert_eq!(t.total_months, 12);
        assert!(!warn);
    }

    #[test]
    fn test_idempotent() {
        for (y, m) in [(0, 0), (3, 12), (7, 13), (-2, 5), (1, -1), (30, 11)] {
            let (first, _) = normalize(y, m);
            let (second, warn) = normalize(i64::from(first.years), i64::from(first.months));
            assert_eq!(first, second);
            assert!(!warn);
        }
    }

    #[test]
    fn test_huge_years_keep_total_in_range() {
        let (t, _) = normalize(i64::MAX, 11);
        assert_eq!(t.total_months, t.years * 12 + 11);
    }

    #[test]
    fn test_normalize_tenure_message() {
        let out = normalize_tenure(1, 14);
        assert!(out.warning);
        assert_eq!(out.message.as_deref(), Some(TENURE_WARNING));
        assert_eq!(out.notice_ms, Some(3000));

        let out = normalize_tenure(1, 3);
        assert!(!out.warning);
        assert!(out.message.is_none());
        assert!(out.notice_ms.is_none());
    }
}
