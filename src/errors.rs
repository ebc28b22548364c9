use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EmiError {
    #[error("invalid loan spec: {field} {reason}")]
    InvalidLoanSpec {
        field: String,
        reason: String,
    },

    #[error("no payments: tenure of {tenure_years} years at {periods_per_year} periods per year rounds to zero periods")]
    NoPayments {
        tenure_years: Decimal,
        periods_per_year: u32,
    },

    #[error("too many payments: tenure of {tenure_years} years at {periods_per_year} periods per year exceeds {max_periods} periods")]
    TooManyPayments {
        tenure_years: Decimal,
        periods_per_year: u32,
        max_periods: u32,
    },

    #[error("calculation overflow: {context}")]
    CalculationOverflow {
        context: String,
    },

    #[error("invalid page: {page} (total pages {total_pages})")]
    InvalidPage {
        page: usize,
        total_pages: usize,
    },

    #[error("invalid rows per page: {rows_per_page}")]
    InvalidRowsPerPage {
        rows_per_page: usize,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("no calculation has been made yet")]
    NoCalculation,

    #[error("serialization error: {message}")]
    Serialization {
        message: String,
    },
}

impl EmiError {
    pub(crate) fn invalid_spec(field: &str, reason: &str) -> Self {
        EmiError::InvalidLoanSpec {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<serde_json::Error> for EmiError {
    fn from(e: serde_json::Error) -> Self {
        EmiError::Serialization {
            message: e.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EmiError>;
