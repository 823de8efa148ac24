use crate::query::{ProductTotals, Summary};
use anyhow::Result;
use serde::Serialize;
use viz_common::{BarMode, ChartFragment, Figure, Trace};

/// One line of the summary table, already formatted for display.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TableRow {
    pub label: String,
    pub stock: String,
    pub price: String,
}

fn names(products: &[ProductTotals]) -> Vec<String> {
    products.iter().map(|p| p.product_name.clone()).collect()
}

fn stocks(products: &[ProductTotals]) -> Vec<f64> {
    products.iter().map(|p| p.stock).collect()
}

fn prices(products: &[ProductTotals]) -> Vec<f64> {
    products.iter().map(|p| p.price_with_gst).collect()
}

pub fn stock_figure(products: &[ProductTotals]) -> Figure {
    Figure::new("Stock per Product")
        .with_trace(Trace::bar("Stock", names(products), stocks(products)))
        .with_axis_titles("Product", "Stock")
}

pub fn price_figure(products: &[ProductTotals]) -> Figure {
    Figure::new("Price (incl. GST) per Product")
        .with_trace(Trace::bar("Price with GST", names(products), prices(products)))
        .with_axis_titles("Product", "Price with GST")
}

/// Stock and price stacked into one bar per product.
pub fn total_figure(products: &[ProductTotals]) -> Figure {
    Figure::new("Stock and Price per Product")
        .with_trace(Trace::bar("Stock", names(products), stocks(products)))
        .with_trace(Trace::bar("Price with GST", names(products), prices(products)))
        .with_barmode(BarMode::Stack)
        .with_axis_titles("Product", "Total")
}

/// The three inventory charts, in page order.
pub fn fragments(products: &[ProductTotals]) -> Result<Vec<ChartFragment>> {
    Ok(vec![
        stock_figure(products).fragment("stock-chart")?,
        price_figure(products).fragment("price-chart")?,
        total_figure(products).fragment("total-chart")?,
    ])
}

/// One row per product, then the totals and means of the whole selection.
/// An undefined mean is left blank.
pub fn summary_table(products: &[ProductTotals], summary: &Summary) -> Vec<TableRow> {
    let blank_or = |value: Option<f64>| value.map(|v| format!("{v:.2}")).unwrap_or_default();

    let mut rows = products
        .iter()
        .map(|p| TableRow {
            label: p.product_name.clone(),
            stock: format!("{:.2}", p.stock),
            price: format!("{:.2}", p.price_with_gst),
        })
        .collect::<Vec<_>>();
    rows.push(TableRow {
        label: "Total".to_string(),
        stock: format!("{:.2}", summary.stock_total),
        price: format!("{:.2}", summary.price_total),
    });
    rows.push(TableRow {
        label: "Mean".to_string(),
        stock: blank_or(summary.stock_mean),
        price: blank_or(summary.price_mean),
    });
    rows
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
