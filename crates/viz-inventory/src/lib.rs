pub mod charts;
pub mod clean;
pub mod query;
pub mod table;
pub mod web;

pub use crate::query::{Filter, FilterError, FilterForm, Summary};
pub use crate::table::{InventoryRecord, InventoryTable};
