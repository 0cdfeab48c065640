use serde::{Deserialize, Serialize};
use shared::models::{CandlestickPattern, FibonacciLevel, Indicator, TimeFrame};

/// Everything the engine computes for one bar series in a single pass.
///
/// Every indicator line has `bars` entries and lines up with `timestamps`
/// by index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub symbol: String,
    pub timeframe: TimeFrame,
    pub bars: usize,
    pub timestamps: Vec<i64>,
    pub indicators: Vec<Indicator>,
    pub fibonacci: Vec<FibonacciLevel>,
    pub patterns: Vec<CandlestickPattern>,
}

impl AnalysisReport {
    pub fn indicator(&self, name_prefix: &str) -> Option<&Indicator> {
        self.indicators.iter().find(|ind| ind.name.starts_with(name_prefix))
    }

    /// Value of `label` at the last bar, if defined there.
    pub fn latest(&self, name_prefix: &str, label: &str) -> Option<f64> {
        self.indicator(name_prefix)?
            .line(label)?
            .values
            .last()
            .copied()
            .flatten()
    }
}
