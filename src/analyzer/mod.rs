// Analyzer module: indicator math plus the two report variants.

pub mod digest;
pub mod indicators;
pub mod threshold;

use crate::config::{AppConfig, ReportMode};
use crate::model::{FetchError, PriceSeries};

pub use digest::DigestAnalyzer;
pub use threshold::ThresholdAnalyzer;

/// Turns one symbol's price history into a report entry.
///
/// Implementations are pure: the same series always yields the same text.
pub trait Analyzer: Send + Sync {
    /// Entry text for the symbol, or `None` when there is nothing to report.
    fn analyze(&self, symbol: &str, series: &PriceSeries) -> Option<String>;

    /// Entry text to use when the price history could not be fetched.
    fn on_fetch_error(&self, symbol: &str, err: &FetchError) -> Option<String>;

    /// Report heading for this variant.
    fn title(&self) -> &str;

    fn footer(&self) -> &str;
}

pub fn analyzer_for(config: &AppConfig) -> Box<dyn Analyzer> {
    match config.mode {
        ReportMode::Alert => Box::new(ThresholdAnalyzer::new(
            config.long_window,
            config.medium_window,
        )),
        ReportMode::Digest => Box::new(DigestAnalyzer::new(config.digest_min_observations)),
    }
}
