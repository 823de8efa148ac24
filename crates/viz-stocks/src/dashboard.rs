use crate::error::LookupError;
use crate::tickers::{self, Company};
use crate::yahoo::PriceSource;
use chrono::{DateTime, Utc};
use log::{debug, error};
use viz_common::{Figure, Trace};

/// 2010-01-01T00:00:00Z; every series starts here.
const HISTORY_START: i64 = 1_262_304_000;

pub fn history_start() -> DateTime<Utc> {
    DateTime::from_timestamp(HISTORY_START, 0).expect("2010-01-01 is a valid timestamp")
}

/// Resolve every company in `input`, then fetch their closes up to `end` and
/// draw one line per company, in input order.
///
/// Nothing is fetched unless every name resolves. The first empty series or
/// failed fetch stops the whole chart.
pub async fn stock_figure<S: PriceSource>(
    source: &S,
    input: &str,
    end: DateTime<Utc>,
) -> Result<Figure, LookupError> {
    let companies = tickers::resolve(input)?;
    let names = companies
        .iter()
        .map(|company| company.name.as_str())
        .collect::<Vec<_>>();
    let mut figure = Figure::new(format!("{} Stock Data", names.join(", ")));

    for Company { name, ticker } in &companies {
        debug!("[{ticker}] {name} resolved; fetching closes");
        let closes = source
            .daily_closes(ticker, history_start(), end)
            .await
            .map_err(|e| {
                error!("[{ticker}] {name} failed to fetch closes: {e:#}");
                LookupError::Fetch(format!("{e:#}"))
            })?;

        if closes.is_empty() {
            return Err(LookupError::NoData(name.clone()));
        }

        let (dates, prices): (Vec<String>, Vec<f64>) = closes
            .into_iter()
            .map(|point| (point.dated.to_string(), point.close))
            .unzip();
        figure = figure.with_trace(Trace::line(name.as_str(), dates, prices));
    }

    Ok(figure)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yahoo::ClosePoint;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Canned closes per ticker; tickers without an entry fail the fetch.
    #[derive(Default)]
    struct Canned {
        closes: HashMap<&'static str, Vec<ClosePoint>>,
        calls: Mutex<Vec<String>>,
    }

    impl Canned {
        fn with(mut self, ticker: &'static str, closes: &[f64]) -> Self {
            let points = closes
                .iter()
                .enumerate()
                .map(|(i, close)| ClosePoint {
                    dated: NaiveDate::from_ymd_opt(2024, 1, 1 + i as u32).unwrap(),
                    close: *close,
                })
                .collect();
            self.closes.insert(ticker, points);
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl PriceSource for Canned {
        async fn daily_closes(
            &self,
            ticker: &str,
            start: DateTime<Utc>,
            _end: DateTime<Utc>,
        ) -> anyhow::Result<Vec<ClosePoint>> {
            assert_eq!(start, history_start());
            self.calls.lock().unwrap().push(ticker.to_string());
            self.closes
                .get(ticker)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("connection refused"))
        }
    }

    #[tokio::test]
    async fn one_series_per_company_in_input_order() {
        let source = Canned::default()
            .with("MSFT", &[370.0, 372.5])
            .with("AAPL", &[185.0, 186.0, 187.5]);

        let figure = stock_figure(&source, "microsoft, Apple", Utc::now())
            .await
            .unwrap();

        assert_eq!(figure.layout.title.text, "microsoft, Apple Stock Data");
        let names = figure.data.iter().map(|t| t.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["microsoft", "Apple"]);
        assert_eq!(figure.data[1].y, vec![185.0, 186.0, 187.5]);
        assert_eq!(figure.data[1].x[0], "2024-01-01");
        assert_eq!(source.calls(), ["MSFT", "AAPL"]);
    }

    #[tokio::test]
    async fn invalid_name_fetches_nothing() {
        let source = Canned::default().with("AAPL", &[185.0]);

        let err = stock_figure(&source, "Apple, Foo", Utc::now())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Error: Company name 'Foo' is invalid");
        assert!(source.calls().is_empty());
    }

    #[tokio::test]
    async fn empty_series_reports_no_data() {
        let source = Canned::default()
            .with("AAPL", &[185.0])
            .with("TSLA", &[]);

        let err = stock_figure(&source, "Apple, Tesla", Utc::now())
            .await
            .unwrap_err();

        assert_eq!(err, LookupError::NoData("Tesla".to_string()));
        assert_eq!(err.to_string(), "No data found for Tesla");
    }

    #[tokio::test]
    async fn fetch_failure_aborts_with_its_message() {
        let source = Canned::default().with("AAPL", &[185.0]);

        let err = stock_figure(&source, "Apple, Nike, Visa", Utc::now())
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Error retrieving stock data: connection refused"
        );
        // stops at the first failure
        assert_eq!(source.calls(), ["AAPL", "NKE"]);
    }
}
