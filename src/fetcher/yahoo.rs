use crate::config::Lookback;
use crate::fetcher::traits::PriceSource;
use crate::model::{FetchError, PricePoint, PriceSeries};
use crate::utils::timestamp_to_date;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{info, warn};

const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

// Only the parts of the chart response we read.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

pub struct YahooSource {
    client: Client,
    base_url: String,
}

impl YahooSource {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) PriceSentinel/0.1")
            .build()?;

        Ok(Self {
            client,
            base_url: CHART_URL.to_string(),
        })
    }

    /// Chart URL for `symbol`; the symbol is encoded as a single path segment.
    fn build_url(&self, symbol: &str) -> Result<Url, FetchError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .push(symbol);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl PriceSource for YahooSource {
    async fn fetch_history(
        &self,
        symbol: &str,
        lookback: Lookback,
    ) -> Result<PriceSeries, FetchError> {
        let url = self.build_url(symbol)?;
        info!("Fetching {} history for {}", lookback, symbol);

        let response = self
            .client
            .get(url)
            .query(&[("range", lookback.as_str()), ("interval", "1d")])
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        let parsed = parse_chart(symbol, &body);
        if status.is_success() {
            return parsed;
        }

        match parsed {
            Err(FetchError::Provider(msg)) => Err(FetchError::Provider(msg)),
            _ => {
                warn!("Yahoo responded [{}] for {}", status, symbol);
                Err(FetchError::Status(status.as_u16()))
            }
        }
    }
}

/// Turns a chart response body into a sorted series, dropping days without a close.
fn parse_chart(symbol: &str, body: &str) -> Result<PriceSeries, FetchError> {
    let response: ChartResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    if let Some(err) = response.chart.error {
        let msg = err
            .description
            .or(err.code)
            .unwrap_or_else(|| "unknown provider error".into());
        return Err(FetchError::Provider(format!("{}: {}", symbol, msg)));
    }

    let result = response
        .chart
        .result
        .and_then(|mut r| r.pop())
        .ok_or_else(|| FetchError::NoData(symbol.to_string()))?;

    let closes = result
        .indicators
        .quote
        .first()
        .map(|q| q.close.as_slice())
        .unwrap_or_default();

    let mut points = Vec::with_capacity(result.timestamp.len());
    for (i, ts) in result.timestamp.iter().enumerate() {
        let Some(close) = closes.get(i).copied().flatten() else {
            continue;
        };
        if !close.is_finite() {
            continue;
        }
        let date = timestamp_to_date(*ts)
            .ok_or_else(|| FetchError::Parse(format!("bad timestamp {}", ts)))?;
        points.push(PricePoint { date, close });
    }

    if points.is_empty() {
        return Err(FetchError::NoData(symbol.to_string()));
    }

    Ok(PriceSeries::new(symbol, points))
}
