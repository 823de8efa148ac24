use crate::table::{month_option, InventoryRecord, InventoryTable};
use chrono::{Datelike, Month};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// The filter form, as posted.
#[derive(Deserialize, Debug, Clone)]
pub struct FilterForm {
    #[serde(rename = "companyName")]
    pub company_name: String,
    pub month: String,
    pub year: String,
}

/// Which rows a request is about: one company, one calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub company_name: String,
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid month '{0}'; choose a month between 1 and 12")]
    InvalidMonth(String),

    #[error("Invalid year '{0}'")]
    InvalidYear(String),
}

impl FilterForm {
    /// The month may be a number (`1`-`12`) or a name (`January`, `jan`).
    pub fn parse(&self) -> Result<Filter, FilterError> {
        let month_raw = self.month.trim();
        let month = match month_raw.parse::<u32>() {
            Ok(n) if (1..=12).contains(&n) => n,
            Ok(_) => return Err(FilterError::InvalidMonth(self.month.clone())),
            Err(_) => month_raw
                .parse::<Month>()
                .map(|m| m.number_from_month())
                .map_err(|_| FilterError::InvalidMonth(self.month.clone()))?,
        };
        let year = self
            .year
            .trim()
            .parse::<i32>()
            .map_err(|_| FilterError::InvalidYear(self.year.clone()))?;

        Ok(Filter {
            company_name: self.company_name.trim().to_string(),
            month,
            year,
        })
    }
}

impl Filter {
    pub fn matches(&self, record: &InventoryRecord) -> bool {
        record.company_name == self.company_name
            && record
                .created_at
                .is_some_and(|date| date.month() == self.month && date.year() == self.year)
    }

    /// e.g., `Acme Traders in January 2024`
    pub fn describe(&self) -> String {
        let month = month_option(self.month)
            .map(|m| m.name.to_string())
            .unwrap_or_else(|| self.month.to_string());
        format!("{} in {month} {}", self.company_name, self.year)
    }
}

impl InventoryTable {
    /// Rows of the table that match `filter`, in file order.
    pub fn select(&self, filter: &Filter) -> Vec<&InventoryRecord> {
        self.records()
            .iter()
            .filter(|record| filter.matches(record))
            .collect()
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Aggregation
//
///////////////////////////////////////////////////////////////////////////////////////////////////////

/// Totals and means of a selection. The means of an empty selection are `None`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Summary {
    pub rows: usize,
    pub stock_total: f64,
    pub stock_mean: Option<f64>,
    pub price_total: f64,
    pub price_mean: Option<f64>,
}

/// Stock and price summed over every row of one product.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ProductTotals {
    pub product_name: String,
    pub stock: f64,
    pub price_with_gst: f64,
}

impl Summary {
    pub fn of(records: &[&InventoryRecord]) -> Self {
        let rows = records.len();
        let stock_total = records.iter().map(|r| r.stock).sum::<f64>();
        let price_total = records.iter().map(|r| r.price_with_gst).sum::<f64>();
        let mean = |total: f64| (rows > 0).then(|| total / rows as f64);

        Summary {
            rows,
            stock_total,
            stock_mean: mean(stock_total),
            price_total,
            price_mean: mean(price_total),
        }
    }
}

/// Group a selection by product name, sorted by name.
pub fn by_product(records: &[&InventoryRecord]) -> Vec<ProductTotals> {
    let mut groups = BTreeMap::<&str, (f64, f64)>::new();
    for record in records {
        let entry = groups.entry(record.product_name.as_str()).or_default();
        entry.0 += record.stock;
        entry.1 += record.price_with_gst;
    }

    groups
        .into_iter()
        .map(|(product_name, (stock, price_with_gst))| ProductTotals {
            product_name: product_name.to_string(),
            stock,
            price_with_gst,
        })
        .collect()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(
        company: &str,
        product: &str,
        date: (i32, u32, u32),
        stock: f64,
        price: f64,
    ) -> InventoryRecord {
        InventoryRecord {
            company_name: company.to_string(),
            product_name: product.to_string(),
            created_at: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
            stock,
            price_with_gst: price,
        }
    }

    fn form(company: &str, month: &str, year: &str) -> FilterForm {
        FilterForm {
            company_name: company.to_string(),
            month: month.to_string(),
            year: year.to_string(),
        }
    }

    #[test]
    fn month_accepts_numbers_and_names() {
        assert_eq!(form("Acme", "1", "2024").parse().unwrap().month, 1);
        assert_eq!(form("Acme", " 12 ", "2024").parse().unwrap().month, 12);
        assert_eq!(form("Acme", "March", "2024").parse().unwrap().month, 3);
        assert_eq!(
            form("Acme", "13", "2024").parse(),
            Err(FilterError::InvalidMonth("13".to_string()))
        );
        assert_eq!(
            form("Acme", "0", "2024").parse(),
            Err(FilterError::InvalidMonth("0".to_string()))
        );
        assert_eq!(
            form("Acme", "", "2024").parse(),
            Err(FilterError::InvalidMonth("".to_string()))
        );
    }

    #[test]
    fn year_must_be_a_number() {
        assert_eq!(
            form("Acme", "1", "last year").parse(),
            Err(FilterError::InvalidYear("last year".to_string()))
        );
    }

    #[test]
    fn filter_matches_company_and_calendar_month() {
        let filter = form("Acme", "1", "2024").parse().unwrap();
        assert!(filter.matches(&record("Acme", "Pen", (2024, 1, 31), 1.0, 1.0)));
        assert!(!filter.matches(&record("Acme", "Pen", (2024, 2, 1), 1.0, 1.0)));
        assert!(!filter.matches(&record("Acme", "Pen", (2023, 1, 5), 1.0, 1.0)));
        assert!(!filter.matches(&record("acme", "Pen", (2024, 1, 5), 1.0, 1.0)));

        let mut undated = record("Acme", "Pen", (2024, 1, 5), 1.0, 1.0);
        undated.created_at = None;
        assert!(!filter.matches(&undated));
    }

    #[test]
    fn summary_matches_a_manual_computation() {
        let a = record("Acme", "Pen", (2024, 1, 3), 120.0, 11.8);
        let b = record("Acme", "Pad", (2024, 1, 5), 1040.0, 59.0);
        let c = record("Acme", "Pen", (2024, 1, 22), 80.0, 11.8);
        let summary = Summary::of(&[&a, &b, &c]);

        assert_eq!(summary.rows, 3);
        assert_eq!(summary.stock_total, 1240.0);
        assert_eq!(summary.stock_mean, Some(1240.0 / 3.0));
        assert!((summary.price_total - 82.6).abs() < 1e-9);
        assert!((summary.price_mean.unwrap() - 82.6 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn empty_summary_has_no_means() {
        let summary = Summary::of(&[]);
        assert_eq!(summary.rows, 0);
        assert_eq!(summary.stock_total, 0.0);
        assert_eq!(summary.stock_mean, None);
        assert_eq!(summary.price_mean, None);
    }

    #[test]
    fn products_are_grouped_and_sorted() {
        let a = record("Acme", "Pen", (2024, 1, 3), 120.0, 10.0);
        let b = record("Acme", "Pad", (2024, 1, 5), 40.0, 59.0);
        let c = record("Acme", "Pen", (2024, 1, 22), 80.0, 10.0);

        let products = by_product(&[&a, &b, &c]);
        assert_eq!(
            products,
            vec![
                ProductTotals {
                    product_name: "Pad".to_string(),
                    stock: 40.0,
                    price_with_gst: 59.0
                },
                ProductTotals {
                    product_name: "Pen".to_string(),
                    stock: 200.0,
                    price_with_gst: 20.0
                },
            ]
        );
    }

    #[test]
    fn describe_names_the_month() {
        let filter = form("Acme Traders", "1", "2024").parse().unwrap();
        assert_eq!(filter.describe(), "Acme Traders in January 2024");
    }
}
