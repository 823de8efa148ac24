use thiserror::Error;

/// Everything that can stop the stock chart from being drawn.
///
/// The `Display` output is what the user sees in place of the chart.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("Please enter at least one company name")]
    NoInput,

    #[error("Error: Company name '{0}' is invalid")]
    InvalidCompany(String),

    #[error("No data found for {0}")]
    NoData(String),

    #[error("Error retrieving stock data: {0}")]
    Fetch(String),
}
