use crate::analyzer::Analyzer;
use crate::analyzer::indicators::percent_change;
use crate::model::{FetchError, PriceSeries, SymbolSignal};
use crate::utils::signed_percent;
use tracing::warn;

/// Produces a day-over-day status line for every symbol.
pub struct DigestAnalyzer {
    min_observations: usize,
}

impl DigestAnalyzer {
    pub fn new(min_observations: usize) -> Self {
        Self { min_observations }
    }

    pub fn evaluate(&self, series: &PriceSeries) -> Option<SymbolSignal> {
        if series.len() < self.min_observations {
            return None;
        }
        let price = series.latest()?.close;
        let previous = series.previous()?.close;

        Some(SymbolSignal {
            symbol: series.symbol.clone(),
            price,
            averages: Vec::new(),
            change_pct: percent_change(previous, price),
            alerts: Vec::new(),
        })
    }

    fn unavailable(symbol: &str) -> String {
        format!("⚠️ {}: data unavailable", symbol)
    }
}

impl Analyzer for DigestAnalyzer {
    fn analyze(&self, symbol: &str, series: &PriceSeries) -> Option<String> {
        let Some(signal) = self.evaluate(series) else {
            return Some(format!(
                "⚪ {}: insufficient data ({} bars)",
                symbol,
                series.len()
            ));
        };
        let Some(change) = signal.change_pct else {
            return Some(Self::unavailable(symbol));
        };

        let indicator = if change < 0.0 { "🔴" } else { "🟢" };
        Some(format!(
            "{} {}: ${:.2} ({})",
            indicator,
            symbol,
            signal.price,
            signed_percent(change)
        ))
    }

    fn on_fetch_error(&self, symbol: &str, err: &FetchError) -> Option<String> {
        warn!("{} unavailable: {}", symbol, err);
        Some(Self::unavailable(symbol))
    }

    fn title(&self) -> &str {
        "📈 Watchlist Digest"
    }

    fn footer(&self) -> &str {
        "Daily closes, change vs. previous session."
    }
}
