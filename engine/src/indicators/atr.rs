// Average True Range (ATR) indicator implementation
use super::IndicatorCalculator;
use serde_json::Value;
use shared::models::{Candle, IndicatorLine, Series};

/// `max(high - low, |high - prev_close|, |low - prev_close|)`
pub fn true_range(candle: &Candle, prev_close: f64) -> f64 {
    (candle.high - candle.low)
        .max((candle.high - prev_close).abs())
        .max((candle.low - prev_close).abs())
}

/// Average True Range with Wilder smoothing.
///
/// Bar 0 has no previous close and is always `None`. The seed at index
/// `period` is the plain mean of the true ranges at `1..=period`; later
/// values are `(atr[i - 1] * (period - 1) + tr[i]) / period`.
pub fn atr(candles: &[Candle], period: usize) -> Series {
    let mut results = vec![None; candles.len()];
    if period == 0 {
        return results;
    }

    let n = period as f64;
    let mut tr_sum = 0.0;
    let mut previous_atr = 0.0;

    for i in 1..candles.len() {
        let tr = true_range(&candles[i], candles[i - 1].close);
        if i < period {
            tr_sum += tr;
        } else if i == period {
            tr_sum += tr;
            previous_atr = tr_sum / n;
            results[i] = Some(previous_atr);
        } else {
            previous_atr = (previous_atr * (n - 1.0) + tr) / n;
            results[i] = Some(previous_atr);
        }
    }
    results
}

pub struct Atr {
    name: String,
    period: usize,
}

impl Atr {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("ATR({})", period),
            period,
        }
    }
}

impl IndicatorCalculator for Atr {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[Candle]) -> Vec<IndicatorLine> {
        vec![IndicatorLine::new("atr", atr(data, self.period))]
    }
}
