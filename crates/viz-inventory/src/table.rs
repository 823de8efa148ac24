use crate::clean::clean_numeric;
use anyhow::Result;
use chrono::{Datelike, Month, NaiveDate};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// `createdAt` is day-month-year; any of these separators is accepted.
const DATE_FORMATS: [&str; 3] = ["%d-%m-%Y", "%d/%m/%Y", "%d.%m.%Y"];

///////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Input: inventory CSV
//
///////////////////////////////////////////////////////////////////////////////////////////////////////

/// One row of the CSV, exactly as written.
///
/// ```csv
/// companyName,productName,createdAt,stock,priceWithGST
/// Acme Traders,Notebook A5,05-01-2024,"1,040",$59.00
/// ```
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    pub company_name: String,
    pub product_name: String,
    pub created_at: String,
    #[serde(default)]
    pub stock: String,
    #[serde(rename = "priceWithGST", default)]
    pub price_with_gst: String,
}

///////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Output: the working table
//
///////////////////////////////////////////////////////////////////////////////////////////////////////

/// A row that survived cleaning; stock and price are always present.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct InventoryRecord {
    pub company_name: String,
    pub product_name: String,
    pub created_at: Option<NaiveDate>,
    pub stock: f64,
    pub price_with_gst: f64,
}

/// Every usable inventory row, loaded once and never written to again.
#[derive(Debug, Default)]
pub struct InventoryTable {
    records: Vec<InventoryRecord>,
    dropped: usize,
}

/// What the dropdowns of the filter form offer.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FormOptions {
    pub companies: Vec<String>,
    pub months: Vec<MonthOption>,
    pub years: Vec<i32>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MonthOption {
    pub value: u32,
    pub name: &'static str,
}

impl InventoryRecord {
    /// Clean a raw row; `None` when stock or price is missing.
    pub fn from_raw(raw: RawRecord) -> Option<Self> {
        let stock = clean_numeric(&raw.stock)?;
        let price_with_gst = clean_numeric(&raw.price_with_gst)?;
        let created_at = parse_date(&raw.created_at);
        if created_at.is_none() {
            warn!(
                "{} / {}: unreadable createdAt {:?}; the row will never match a month",
                raw.company_name, raw.product_name, raw.created_at
            );
        }
        Some(InventoryRecord {
            company_name: raw.company_name.trim().to_string(),
            product_name: raw.product_name.trim().to_string(),
            created_at,
            stock,
            price_with_gst,
        })
    }
}

/// Parse a day-month-year date, ignoring any time of day after it.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let date = raw.trim().split([' ', 'T']).next()?;
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(date, format).ok())
}

impl InventoryTable {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| anyhow::anyhow!("failed to open {}: {e}", path.display()))?;
        let table = Self::from_reader(file)?;
        info!(
            "{} inventory rows loaded from {} ({} dropped)",
            table.records.len(),
            path.display(),
            table.dropped
        );
        Ok(table)
    }

    /// Read and clean CSV rows. Rows with a missing stock or price, or that do
    /// not fit the header, are dropped.
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .flexible(true)
            .from_reader(reader);

        let mut table = InventoryTable::default();
        for (i, row) in rdr.deserialize::<RawRecord>().enumerate() {
            let raw = match row {
                Ok(raw) => raw,
                Err(e) => {
                    warn!("inventory row {} is malformed: {e}", i + 1);
                    table.dropped += 1;
                    continue;
                }
            };

            let label = format!("{} / {}", raw.company_name, raw.product_name);
            match InventoryRecord::from_raw(raw) {
                Some(record) => table.records.push(record),
                None => {
                    debug!("inventory row {} ({label}) has no usable stock or price", i + 1);
                    table.dropped += 1;
                }
            }
        }
        Ok(table)
    }

    pub fn records(&self) -> &[InventoryRecord] {
        &self.records
    }

    /// Rows removed while loading.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn options(&self) -> FormOptions {
        let companies = self
            .records
            .iter()
            .map(|record| record.company_name.clone())
            .collect::<BTreeSet<_>>();
        let dates = self
            .records
            .iter()
            .filter_map(|record| record.created_at)
            .collect::<Vec<_>>();
        let months = dates
            .iter()
            .map(|date| date.month())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .filter_map(month_option)
            .collect();
        let years = dates
            .iter()
            .map(|date| date.year())
            .collect::<BTreeSet<_>>();

        FormOptions {
            companies: companies.into_iter().collect(),
            months,
            years: years.into_iter().collect(),
        }
    }
}

pub fn month_option(value: u32) -> Option<MonthOption> {
    let month = Month::try_from(u8::try_from(value).ok()?).ok()?;
    Some(MonthOption {
        value,
        name: month.name(),
    })
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
