pub mod dashboard;
pub mod error;
pub mod tickers;
pub mod web;
pub mod yahoo;

pub use crate::error::LookupError;
pub use crate::yahoo::{ClosePoint, PriceSource, Yahoo};
