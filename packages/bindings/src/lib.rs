use napi::Result as NapiResult;
use napi_derive::napi;

use emi_core::amortization::{self, LoanInput};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Serialise an optional result; incomplete input comes back as JSON `null`.
fn to_json_or_null<T: serde::Serialize>(output: Option<T>) -> NapiResult<String> {
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Tenure
// ---------------------------------------------------------------------------

#[napi]
pub fn normalize_tenure(years: i64, months: i64) -> NapiResult<String> {
    let output = emi_core::tenure::normalize_tenure(years, months);
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// EMI
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_emi(input_json: String) -> NapiResult<String> {
    let input: LoanInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = amortization::calculate_emi(&input).map_err(to_napi_error)?;
    to_json_or_null(output)
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: LoanInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = amortization::amortization_schedule(&input).map_err(to_napi_error)?;
    to_json_or_null(output)
}
