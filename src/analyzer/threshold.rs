use crate::analyzer::Analyzer;
use crate::analyzer::indicators::{percent_below, trailing_mean};
use crate::model::{FetchError, MovingAverage, PriceSeries, SymbolSignal};
use tracing::{debug, info, warn};

/// Flags symbols whose latest close is under the long or medium moving average.
pub struct ThresholdAnalyzer {
    long_window: usize,
    medium_window: usize,
}

impl ThresholdAnalyzer {
    pub fn new(long_window: usize, medium_window: usize) -> Self {
        Self {
            long_window,
            medium_window,
        }
    }

    /// Computes price, both averages and alert lines. `None` when the series is
    /// shorter than the long window.
    pub fn evaluate(&self, series: &PriceSeries) -> Option<SymbolSignal> {
        if series.len() < self.long_window {
            info!(
                "{}: {} bars, need {} for the long average",
                series.symbol,
                series.len(),
                self.long_window
            );
            return None;
        }

        let closes = series.closes();
        let price = series.latest()?.close;

        let mut averages = Vec::with_capacity(2);
        let mut alerts = Vec::new();
        for window in [self.long_window, self.medium_window] {
            let Some(value) = trailing_mean(&closes, window) else {
                continue;
            };
            if price < value {
                alerts.push(format!(
                    "⚠️ Below {}-day average ({:.1}% under)",
                    window,
                    percent_below(value, price)
                ));
            }
            averages.push(MovingAverage { window, value });
        }

        Some(SymbolSignal {
            symbol: series.symbol.clone(),
            price,
            averages,
            change_pct: None,
            alerts,
        })
    }
}

impl Analyzer for ThresholdAnalyzer {
    fn analyze(&self, symbol: &str, series: &PriceSeries) -> Option<String> {
        let signal = self.evaluate(series)?;
        let averages: Vec<String> = signal
            .averages
            .iter()
            .map(|ma| format!("MA{} {:.2}", ma.window, ma.value))
            .collect();
        debug!("{}: ${:.2} | {}", signal.symbol, signal.price, averages.join(", "));

        if signal.alerts.is_empty() {
            return None;
        }
        Some(format!(
            "【{}】${:.2}\n{}",
            symbol,
            signal.price,
            signal.alerts.join("\n")
        ))
    }

    fn on_fetch_error(&self, symbol: &str, err: &FetchError) -> Option<String> {
        warn!("Skipping {}: {}", symbol, err);
        None
    }

    fn title(&self) -> &str {
        "📊 US Stock Alert"
    }

    fn footer(&self) -> &str {
        "Mind your risk management!"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        PriceSeries::from_closes("NVDA", start, closes)
    }

    #[test]
    fn short_history_is_skipped() {
        let analyzer = ThresholdAnalyzer::new(200, 100);
        let s = series(&vec![10.0; 199]);
        assert!(analyzer.evaluate(&s).is_none());
        assert!(analyzer.analyze("NVDA", &s).is_none());
    }

    #[test]
    fn price_above_both_averages_is_quiet() {
        let analyzer = ThresholdAnalyzer::new(200, 100);
        let closes: Vec<f64> = (0..220).map(|i| 100.0 + i as f64).collect();
        assert!(analyzer.analyze("NVDA", &series(&closes)).is_none());
    }

    #[test]
    fn reports_shortfall_under_long_average() {
        let analyzer = ThresholdAnalyzer::new(200, 100);
        // 100 bars at 120 then 99 bars at 90 and a final close of 95: under the
        // 200-day mean but above the 100-day one.
        let mut closes = vec![120.0; 100];
        closes.extend(vec![90.0; 99]);
        closes.push(95.0);

        let s = series(&closes);
        let ma200 = closes.iter().sum::<f64>() / 200.0;
        let ma100 = closes[100..].iter().sum::<f64>() / 100.0;
        assert!(95.0 < ma200 && 95.0 > ma100);

        let text = analyzer.analyze("NVDA", &s).unwrap();
        let expected = format!("{:.1}%", (ma200 - 95.0) / ma200 * 100.0);
        assert!(text.starts_with("【NVDA】$95.00"));
        assert!(text.contains(&format!("Below 200-day average ({} under)", expected)));
        assert!(!text.contains("100-day"));
    }

    #[test]
    fn reports_medium_average_only() {
        let analyzer = ThresholdAnalyzer::new(200, 100);
        // Above the 200-day mean (99.95), under the 100-day mean (119.9).
        let mut closes = vec![80.0; 100];
        closes.extend(vec![120.0; 99]);
        closes.push(110.0);

        let ma100 = closes[100..].iter().sum::<f64>() / 100.0;
        let text = analyzer.analyze("AMD", &series(&closes)).unwrap();
        let expected = format!("{:.1}%", (ma100 - 110.0) / ma100 * 100.0);
        assert!(text.starts_with("【AMD】$110.00"));
        assert!(text.contains(&format!("Below 100-day average ({} under)", expected)));
        assert!(!text.contains("200-day"));
    }

    #[test]
    fn reports_both_averages_long_first() {
        let analyzer = ThresholdAnalyzer::new(200, 100);
        let mut closes = vec![100.0; 199];
        closes.push(80.0);

        let signal = analyzer.evaluate(&series(&closes)).unwrap();
        assert_eq!(signal.alerts.len(), 2);
        assert!(signal.alerts[0].contains("200-day"));
        assert!(signal.alerts[1].contains("100-day"));
        assert_eq!(signal.averages.len(), 2);
        assert_eq!(signal.averages[0].window, 200);
    }

    #[test]
    fn fetch_error_is_omitted() {
        let analyzer = ThresholdAnalyzer::new(200, 100);
        let err = FetchError::NoData("NVDA".into());
        assert!(analyzer.on_fetch_error("NVDA", &err).is_none());
    }
}
