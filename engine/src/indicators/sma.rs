// Simple Moving Average (SMA) indicator implementation
use super::{closes, IndicatorCalculator};
use serde_json::Value;
use shared::models::{Candle, IndicatorLine, Series};

/// Rolling mean over `period` values.
///
/// Positions `0..period - 1` are `None`. A `period` of zero, or one longer
/// than the input, yields a series that is `None` everywhere.
pub fn sma(values: &[f64], period: usize) -> Series {
    if period == 0 || values.len() < period {
        return vec![None; values.len()];
    }

    let mut results = vec![None; period - 1];

    // Sum for the first window, then slide by adding the newest value and
    // dropping the oldest.
    let mut sum: f64 = values.iter().take(period).sum();
    results.push(Some(sum / period as f64));

    for i in period..values.len() {
        sum = sum - values[i - period] + values[i];
        results.push(Some(sum / period as f64));
    }
    results
}

pub struct Sma {
    name: String,
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("SMA({})", period),
            period,
        }
    }
}

impl IndicatorCalculator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[Candle]) -> Vec<IndicatorLine> {
        vec![IndicatorLine::new("sma", sma(&closes(data), self.period))]
    }
}
