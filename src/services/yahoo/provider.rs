//! Yahoo Finance market data provider.
//!
//! Daily closes come from the v8 chart API and fundamentals from the v10
//! quoteSummary API. Yahoo has no official API; every figure is optional and a
//! missing one stays unknown.

use crate::models::indicators::{FundamentalsSnapshot, PricePoint, PriceSeries};
use crate::services::market_data::{DataError, MarketDataProvider};
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://query2.finance.yahoo.com";
/// Page whose response sets the session cookie the crumb is bound to.
pub const DEFAULT_COOKIE_URL: &str = "https://fc.yahoo.com";

/// Chart range requested; wide enough to cover the history window.
const CHART_RANGE: &str = "3mo";
const SUMMARY_MODULES: &str = "price,summaryDetail,defaultKeyStatistics";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryResponse {
    quote_summary: SummaryResult,
}

#[derive(Debug, Deserialize)]
struct SummaryResult {
    result: Option<Vec<SummaryData>>,
    error: Option<ApiError>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryData {
    #[serde(default)]
    price: PriceModule,
    #[serde(default)]
    summary_detail: SummaryDetailModule,
    #[serde(default)]
    default_key_statistics: KeyStatisticsModule,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceModule {
    #[serde(default)]
    regular_market_price: RawValue,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryDetailModule {
    #[serde(default, rename = "trailingPE")]
    trailing_pe: RawValue,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeyStatisticsModule {
    #[serde(default)]
    trailing_eps: RawValue,
    #[serde(default)]
    book_value: RawValue,
    #[serde(default)]
    price_to_book: RawValue,
}

/// Yahoo wraps numbers as `{"raw": 1.23, "fmt": "1.23"}`, or `{}` when absent.
#[derive(Debug, Default, Deserialize)]
struct RawValue {
    #[serde(default)]
    raw: Option<f64>,
}

pub struct YahooMarketDataProvider {
    client: reqwest::Client,
    base_url: String,
    cookie_url: Option<String>,
    crumb: Mutex<Option<String>>,
}

impl YahooMarketDataProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL).with_cookie_url(DEFAULT_COOKIE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .cookie_store(true)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self::with_client(base_url, client)
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cookie_url: None,
            crumb: Mutex::new(None),
        }
    }

    /// Visit `cookie_url` before the first crumb request. Without it the crumb
    /// is requested with whatever cookies the client already holds.
    pub fn with_cookie_url(mut self, cookie_url: impl Into<String>) -> Self {
        self.cookie_url = Some(cookie_url.into());
        self
    }

    fn chart_url(&self, symbol: &str) -> String {
        format!(
            "{}/v8/finance/chart/{}?range={}&interval=1d",
            self.base_url, symbol, CHART_RANGE
        )
    }

    fn summary_request(&self, symbol: &str, crumb: &str) -> reqwest::RequestBuilder {
        self.client
            .get(format!("{}/v10/finance/quoteSummary/{}", self.base_url, symbol))
            .query(&[("modules", SUMMARY_MODULES), ("crumb", crumb)])
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        symbol: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, DataError> {
        debug!(symbol = %symbol, "Requesting Yahoo Finance data");
        let response = request.send().await?;

        match response.status() {
            status if status.is_success() => Ok(response.json::<T>().await?),
            StatusCode::NOT_FOUND => Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            }),
            status => Err(DataError::Status {
                symbol: symbol.to_string(),
                status: status.as_u16(),
            }),
        }
    }

    /// Session crumb for quoteSummary, fetched once and reused.
    async fn crumb(&self, symbol: &str) -> Result<String, DataError> {
        let mut cached = self.crumb.lock().await;
        if let Some(crumb) = cached.as_ref() {
            return Ok(crumb.clone());
        }

        if let Some(cookie_url) = &self.cookie_url {
            // Only the Set-Cookie header matters; the page itself usually 404s.
            if let Err(e) = self.client.get(cookie_url).send().await {
                warn!(url = %cookie_url, error = %e, "Could not obtain Yahoo session cookie");
            }
        }

        let response = self
            .client
            .get(format!("{}/v1/test/getcrumb", self.base_url))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DataError::Status {
                symbol: symbol.to_string(),
                status: status.as_u16(),
            });
        }

        let crumb = response.text().await?.trim().to_string();
        if crumb.is_empty() {
            return Err(DataError::ResponseFormatChanged("empty crumb".into()));
        }
        debug!("Obtained Yahoo crumb");
        *cached = Some(crumb.clone());
        Ok(crumb)
    }

    async fn fetch_summary(&self, symbol: &str) -> Result<SummaryResponse, DataError> {
        let crumb = self.crumb(symbol).await?;
        self.get_json(symbol, self.summary_request(symbol, &crumb)).await
    }

    fn api_error(symbol: &str, error: Option<ApiError>) -> DataError {
        match error {
            Some(err) if err.code == "Not Found" => DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            },
            Some(err) => {
                DataError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
            }
            None => DataError::ResponseFormatChanged("empty result with no error".into()),
        }
    }

    fn parse_chart(symbol: &str, response: ChartResponse) -> Result<PriceSeries, DataError> {
        let ChartResult { result, error } = response.chart;
        let Some(data) = result.and_then(|r| r.into_iter().next()) else {
            return Err(Self::api_error(symbol, error));
        };

        // A symbol with no sessions in range comes back without timestamps.
        let timestamps = data.timestamp.unwrap_or_default();
        let closes = data
            .indicators
            .quote
            .into_iter()
            .next()
            .map(|q| q.close)
            .unwrap_or_default();

        let mut points = Vec::with_capacity(timestamps.len());
        for (i, &ts) in timestamps.iter().enumerate() {
            // Non-trading rows carry null closes.
            let Some(close) = closes.get(i).copied().flatten() else {
                continue;
            };
            let date = DateTime::from_timestamp(ts, 0)
                .map(|dt| dt.date_naive())
                .ok_or_else(|| {
                    DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
                })?;
            points.push(PricePoint::new(date, close));
        }

        Ok(PriceSeries::new(points))
    }

    fn parse_summary(
        symbol: &str,
        response: SummaryResponse,
    ) -> Result<FundamentalsSnapshot, DataError> {
        let SummaryResult { result, error } = response.quote_summary;
        let Some(data) = result.and_then(|r| r.into_iter().next()) else {
            return Err(Self::api_error(symbol, error));
        };

        Ok(FundamentalsSnapshot {
            current_price: data.price.regular_market_price.raw,
            trailing_eps: data.default_key_statistics.trailing_eps.raw,
            vendor_pe: data.summary_detail.trailing_pe.raw,
            book_value_per_share: data.default_key_statistics.book_value.raw,
            vendor_pb: data.default_key_statistics.price_to_book.raw,
        })
    }
}

impl Default for YahooMarketDataProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataProvider for YahooMarketDataProvider {
    async fn get_price_history(
        &self,
        symbol: &str,
        sessions: usize,
    ) -> Result<PriceSeries, DataError> {
        let request = self.client.get(self.chart_url(symbol));
        let response: ChartResponse = self.get_json(symbol, request).await?;
        let series = Self::parse_chart(symbol, response)?.most_recent(sessions);
        debug!(symbol = %symbol, sessions = series.len(), "Fetched price history");
        Ok(series)
    }

    async fn get_fundamentals(&self, symbol: &str) -> Result<FundamentalsSnapshot, DataError> {
        let response = match self.fetch_summary(symbol).await {
            Err(DataError::Status { status: 401, .. }) => {
                warn!(symbol = %symbol, "Yahoo rejected the crumb, refreshing");
                *self.crumb.lock().await = None;
                self.fetch_summary(symbol).await?
            }
            other => other?,
        };
        Self::parse_summary(symbol, response)
    }
}
