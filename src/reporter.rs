use crate::analyzer::Analyzer;
use crate::config::Lookback;
use crate::fetcher::PriceSource;
use chrono::NaiveDate;
use tracing::info;

const RULE: &str = "----------------";

/// The assembled text for one run.
#[derive(Debug, Clone)]
pub struct Report {
    pub title: String,
    pub date: NaiveDate,
    pub entries: Vec<String>,
    pub footer: String,
}

impl Report {
    /// True when no symbol contributed an entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn render(&self) -> String {
        let mut parts = Vec::with_capacity(self.entries.len() + 3);
        parts.push(format!("{} ({})", self.title, self.date.format("%Y-%m-%d")));
        parts.push(RULE.to_string());
        if !self.entries.is_empty() {
            parts.push(self.entries.join("\n\n"));
        }
        parts.push(self.footer.clone());
        parts.join("\n")
    }
}

/// Fetches and analyzes every symbol in watchlist order.
///
/// A failed fetch never stops the loop; the analyzer decides whether it shows
/// up as a line or is left out.
pub async fn build_report(
    watchlist: &[String],
    lookback: Lookback,
    source: &dyn PriceSource,
    analyzer: &dyn Analyzer,
    today: NaiveDate,
) -> Report {
    let mut entries = Vec::new();

    for symbol in watchlist {
        info!("Analyzing {}...", symbol);
        let entry = match source.fetch_history(symbol, lookback).await {
            Ok(series) => analyzer.analyze(symbol, &series),
            Err(e) => analyzer.on_fetch_error(symbol, &e),
        };
        if let Some(entry) = entry {
            entries.push(entry);
        }
    }

    Report {
        title: analyzer.title().to_string(),
        date: today,
        entries,
        footer: analyzer.footer().to_string(),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::analyzer::{DigestAnalyzer, ThresholdAnalyzer};
    use crate::model::{FetchError, PriceSeries};
    use std::collections::HashMap;

    /// In-memory source; symbols without closes fail with `NoData`.
    pub(crate) struct FakeSource {
        closes: HashMap<String, Vec<f64>>,
    }

    impl FakeSource {
        pub(crate) fn new(data: &[(&str, Vec<f64>)]) -> Self {
            Self {
                closes: data
                    .iter()
                    .map(|(s, c)| (s.to_string(), c.clone()))
                    .collect(),
            }
        }
    }

    #[async_trait::async_trait]
    impl PriceSource for FakeSource {
        async fn fetch_history(
            &self,
            symbol: &str,
            _lookback: Lookback,
        ) -> Result<PriceSeries, FetchError> {
            let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
            self.closes
                .get(symbol)
                .map(|c| PriceSeries::from_closes(symbol, start, c))
                .ok_or_else(|| FetchError::NoData(symbol.to_string()))
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    fn watchlist(symbols: &[&str]) -> Vec<String> {
        symbols.iter().map(|s| s.to_string()).collect()
    }

    fn rising(n: usize) -> Vec<f64> {
        (0..n).map(|i| 10.0 + i as f64).collect()
    }

    #[tokio::test]
    async fn digest_keeps_order_and_isolates_failures() {
        let source = FakeSource::new(&[("AAA", rising(30)), ("CCC", rising(30))]);
        let analyzer = DigestAnalyzer::new(20);

        let report = build_report(
            &watchlist(&["CCC", "BBB", "AAA"]),
            Lookback::OneYear,
            &source,
            &analyzer,
            today(),
        )
        .await;

        assert_eq!(report.entries.len(), 3);
        assert!(report.entries[0].contains("CCC"));
        assert_eq!(report.entries[1], "⚠️ BBB: data unavailable");
        assert!(report.entries[2].contains("AAA"));
    }

    #[tokio::test]
    async fn alert_mode_omits_failed_and_quiet_symbols() {
        let mut falling = vec![100.0; 199];
        falling.push(50.0);
        let source = FakeSource::new(&[("AAA", rising(250)), ("CCC", falling)]);
        let analyzer = ThresholdAnalyzer::new(200, 100);

        let report = build_report(
            &watchlist(&["AAA", "BBB", "CCC"]),
            Lookback::TwoYears,
            &source,
            &analyzer,
            today(),
        )
        .await;

        assert_eq!(report.entries.len(), 1);
        assert!(report.entries[0].starts_with("【CCC】$50.00"));
    }

    #[tokio::test]
    async fn empty_watchlist_renders_header_and_footer_only() {
        let source = FakeSource::new(&[]);
        let analyzer = ThresholdAnalyzer::new(200, 100);

        let report =
            build_report(&[], Lookback::TwoYears, &source, &analyzer, today()).await;

        assert!(report.is_empty());
        assert_eq!(
            report.render(),
            "📊 US Stock Alert (2025-06-02)\n----------------\nMind your risk management!"
        );
    }

    #[test]
    fn render_separates_entries_with_blank_line() {
        let report = Report {
            title: "T".into(),
            date: today(),
            entries: vec!["a".into(), "b".into()],
            footer: "F".into(),
        };
        assert_eq!(report.render(), "T (2025-06-02)\n----------------\na\n\nb\nF");
    }
}
