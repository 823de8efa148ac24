use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, error, trace, warn};
use reqwest::Client;
use serde::Deserialize;
use std::future::Future;

pub const BASE_URL: &str = "https://query1.finance.yahoo.com";

const INTERVAL: &str = "1d";

/// One trading day's close.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosePoint {
    pub dated: NaiveDate,
    pub close: f64,
}

/// Somewhere to get daily close prices from.
pub trait PriceSource {
    /// Daily closes of `ticker` between `start` and `end`, oldest first.
    fn daily_closes(
        &self,
        ticker: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<ClosePoint>>> + Send;
}

///////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Yahoo Finance chart endpoint
//
///////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Clone, Debug)]
pub struct Yahoo {
    client: Client,
    base_url: String,
}

impl Yahoo {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, BASE_URL)
    }

    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Yahoo {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, ticker: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> String {
        let tckr = ticker.to_uppercase();
        format!(
            "{}/v8/finance/chart/{tckr}?symbol={tckr}&interval={INTERVAL}&period1={}&period2={}&events=div|split|capitalGains",
            self.base_url,
            start.timestamp(),
            end.timestamp(),
        )
    }
}

impl PriceSource for Yahoo {
    async fn daily_closes(
        &self,
        ticker: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ClosePoint>> {
        let url = self.url(ticker, start, end);
        trace!("Fetching price data for [{ticker}] from Yahoo Finance");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| {
                error!("[{ticker}] price fetching error: {e}\nURL: {url}");
                e
            })?;
        let status = response.status();
        let body = response.bytes().await?;

        // an unknown symbol is a 404 with a regular chart body; only a body
        // that isn't a chart at all is an error
        let de = match serde_json::from_slice::<PriceHistory>(&body) {
            Ok(data) => data,
            Err(_) if !status.is_success() => {
                error!("[{ticker}] price fetching error: HTTP {status}\nURL: {url}");
                return Err(anyhow::anyhow!("HTTP {status} from Yahoo Finance"));
            }
            Err(e) => {
                error!("[{ticker}] deserialization error: {e}\nURL: {url}");
                return Err(e.into());
            }
        };
        if !status.is_success() {
            warn!("[{ticker}] Yahoo Finance answered HTTP {status}; treating it as no data");
        }

        let closes = de.closes();
        debug!("[{ticker}] {} daily closes fetched", closes.len());
        Ok(closes)
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Deserialization
//
///////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Deserialize, Debug)]
pub struct PriceHistory {
    pub chart: PriceResponse,
}

#[derive(Deserialize, Debug)]
pub struct PriceResponse {
    pub result: Option<Vec<PriceCategories>>,
}

#[derive(Deserialize, Debug)]
pub struct PriceCategories {
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Deserialize, Debug)]
pub struct Indicators {
    pub quote: Vec<Quote>,
}

#[derive(Deserialize, Debug)]
pub struct Quote {
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

impl PriceHistory {
    /// Pair each timestamp with its close; days Yahoo reports as `null` are skipped,
    /// and a missing `chart.result` is an empty series.
    pub fn closes(&self) -> Vec<ClosePoint> {
        let Some(base) = self.chart.result.as_ref().and_then(|result| result.first()) else {
            return vec![];
        };
        let Some(quote) = base.indicators.quote.first() else {
            return vec![];
        };

        base.timestamp
            .iter()
            .zip(quote.close.iter())
            .filter_map(|(timestamp, close)| {
                let dated = DateTime::from_timestamp(*timestamp, 0)?.date_naive();
                Some(ClosePoint {
                    dated,
                    close: (*close)?,
                })
            })
            .collect()
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_is_built_from_the_period() {
        let yahoo = Yahoo::with_base_url(Client::new(), "http://localhost:1234/");
        let start = DateTime::from_timestamp(1_262_304_000, 0).unwrap();
        let end = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        assert_eq!(
            yahoo.url("aapl", start, end),
            "http://localhost:1234/v8/finance/chart/AAPL?symbol=AAPL&interval=1d&period1=1262304000&period2=1700000000&events=div|split|capitalGains"
        );
    }

    #[test]
    fn null_closes_are_skipped() {
        let history: PriceHistory = serde_json::from_str(
            r#"{
                "chart": {
                    "result": [{
                        "timestamp": [1262615400, 1262701800, 1262788200],
                        "indicators": { "quote": [{ "close": [7.64, null, 7.53] }] }
                    }],
                    "error": null
                }
            }"#,
        )
        .unwrap();

        assert_eq!(
            history.closes(),
            vec![
                ClosePoint {
                    dated: NaiveDate::from_ymd_opt(2010, 1, 4).unwrap(),
                    close: 7.64
                },
                ClosePoint {
                    dated: NaiveDate::from_ymd_opt(2010, 1, 6).unwrap(),
                    close: 7.53
                },
            ]
        );
    }

    #[test]
    fn missing_result_is_empty() {
        let history: PriceHistory = serde_json::from_str(
            r#"{ "chart": { "result": null, "error": { "code": "Not Found", "description": "No data found" } } }"#,
        )
        .unwrap();
        assert!(history.closes().is_empty());
    }

    #[test]
    fn result_without_timestamps_is_empty() {
        let history: PriceHistory = serde_json::from_str(
            r#"{ "chart": { "result": [{ "indicators": { "quote": [{}] } }] } }"#,
        )
        .unwrap();
        assert!(history.closes().is_empty());
    }
}
