use crate::config::Lookback;
use crate::model::{FetchError, PriceSeries};

/// Supplies daily closing prices for a symbol.
#[async_trait::async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_history(&self, symbol: &str, lookback: Lookback)
        -> Result<PriceSeries, FetchError>;
}
