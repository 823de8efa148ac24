pub mod chart;
pub mod page;

pub use crate::chart::{BarMode, ChartFragment, Figure, Trace};
pub use crate::page::Pages;
pub use tera::Context;
