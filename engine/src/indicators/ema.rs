// Exponential Moving Average (EMA) indicator implementation
use super::{closes, IndicatorCalculator};
use serde_json::Value;
use shared::models::{Candle, IndicatorLine, Series};

/// Exponential moving average with smoothing factor `2 / (period + 1)`.
///
/// Unlike [`sma`](super::sma::sma) there is no warm-up: the first output is
/// seeded with the first input and every position is `Some`.
pub fn ema(values: &[f64], period: usize) -> Series {
    let Some(&first) = values.first() else {
        return Vec::new();
    };

    let k = 2.0 / (period as f64 + 1.0);
    let mut results = Vec::with_capacity(values.len());
    let mut previous_ema = first;
    results.push(Some(previous_ema));

    for &value in &values[1..] {
        let ema = value * k + previous_ema * (1.0 - k);
        results.push(Some(ema));
        previous_ema = ema;
    }
    results
}

pub struct Ema {
    name: String,
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("EMA({})", period),
            period,
        }
    }
}

impl IndicatorCalculator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[Candle]) -> Vec<IndicatorLine> {
        vec![IndicatorLine::new("ema", ema(&closes(data), self.period))]
    }
}
