use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Loan
// ---------------------------------------------------------------------------

#[napi]
pub fn quote_loan(input_json: String) -> NapiResult<String> {
    let input: isa_finance_core::loan::quote::LoanQuoteInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = isa_finance_core::loan::quote::quote_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(serde::Deserialize)]
struct AmortizationBindingInput {
    principal: rust_decimal::Decimal,
    annual_rate: rust_decimal::Decimal,
    term_months: u32,
    first_payment_date: chrono::NaiveDate,
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: AmortizationBindingInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let schedule = isa_finance_core::loan::schedule::amortization_schedule(
        input.principal,
        input.annual_rate,
        input.term_months,
        input.first_payment_date,
    );
    serde_json::to_string(&schedule).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// ISA
// ---------------------------------------------------------------------------

#[napi]
pub fn quote_isa(input_json: String) -> NapiResult<String> {
    let input: isa_finance_core::isa::quote::IsaQuoteInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = isa_finance_core::isa::quote::quote_isa(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn project_isa(input_json: String) -> NapiResult<String> {
    let input: isa_finance_core::isa::projection::IsaProjectionInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = isa_finance_core::isa::projection::project_isa(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

#[napi]
pub fn format_currency(amount: String) -> NapiResult<String> {
    let amount: rust_decimal::Decimal = amount.parse().map_err(to_napi_error)?;
    Ok(isa_finance_core::format::currency(amount))
}

#[napi]
pub fn format_percent(rate: String) -> NapiResult<String> {
    let rate: rust_decimal::Decimal = rate.parse().map_err(to_napi_error)?;
    Ok(isa_finance_core::format::percent(rate))
}

#[napi]
pub fn round_hundred(amount: String) -> NapiResult<String> {
    let amount: rust_decimal::Decimal = amount.parse().map_err(to_napi_error)?;
    Ok(isa_finance_core::format::round_hundred(amount).to_string())
}
