// Core structs: PricePoint, PriceSeries, SymbolSignal and the error types
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Daily closes for one symbol, oldest first.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    pub symbol: String,
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        Self {
            symbol: symbol.into(),
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// The observation right before the latest one.
    pub fn previous(&self) -> Option<&PricePoint> {
        self.points.iter().rev().nth(1)
    }

    /// Builds a series of consecutive calendar days starting at `start`.
    #[cfg(test)]
    pub fn from_closes(symbol: &str, start: NaiveDate, closes: &[f64]) -> Self {
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                date: start + chrono::Duration::days(i as i64),
                close,
            })
            .collect();
        Self::new(symbol, points)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovingAverage {
    pub window: usize,
    pub value: f64,
}

/// Metrics derived for one symbol during a single analysis.
#[derive(Debug, Clone)]
pub struct SymbolSignal {
    pub symbol: String,
    pub price: f64,
    pub averages: Vec<MovingAverage>,
    pub change_pct: Option<f64>,
    pub alerts: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("missing credential: {0}")]
    MissingCredential(&'static str),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("provider error: {0}")]
    Provider(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("no data for {0}")]
    NoData(String),

    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notifier is not configured: {0}")]
    NotConfigured(String),

    #[error("http client error: {0}")]
    Client(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("push rejected [{status}]: {body}")]
    Status { status: u16, body: String },
}
