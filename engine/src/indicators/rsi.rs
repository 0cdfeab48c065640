// Relative Strength Index (RSI) indicator implementation
use super::{closes, IndicatorCalculator};
use serde_json::Value;
use shared::models::{Candle, IndicatorLine, Series};

/// RS used when the average loss is exactly zero.
pub const RS_ZERO_LOSS_SENTINEL: f64 = 100.0;

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    let rs = if avg_loss == 0.0 {
        RS_ZERO_LOSS_SENTINEL
    } else {
        avg_gain / avg_loss
    };
    100.0 - 100.0 / (1.0 + rs)
}

/// Relative Strength Index over closing prices.
///
/// Index 0 is always `None`. Gains and losses are summed over indices
/// `1..=period`; the first value appears at `period` from their simple
/// averages. After that the averages follow Wilder's smoothing,
/// `avg = (avg * (period - 1) + current) / period`.
///
/// A zero average loss does not divide: RS is pinned to
/// [`RS_ZERO_LOSS_SENTINEL`], so the RSI stays finite.
pub fn rsi(values: &[f64], period: usize) -> Series {
    let mut results = vec![None; values.len()];
    if period == 0 {
        return results;
    }

    let n = period as f64;
    let mut gains = 0.0;
    let mut losses = 0.0;

    for i in 1..values.len() {
        let change = values[i] - values[i - 1];
        let (current_gain, current_loss) = if change > 0.0 {
            (change, 0.0)
        } else {
            (0.0, -change)
        };

        if i <= period {
            gains += current_gain;
            losses += current_loss;
            if i == period {
                gains /= n;
                losses /= n;
                results[i] = Some(rsi_from_averages(gains, losses));
            }
        } else {
            gains = (gains * (n - 1.0) + current_gain) / n;
            losses = (losses * (n - 1.0) + current_loss) / n;
            results[i] = Some(rsi_from_averages(gains, losses));
        }
    }
    results
}

pub struct Rsi {
    name: String,
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("RSI({})", period),
            period,
        }
    }
}

impl IndicatorCalculator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[Candle]) -> Vec<IndicatorLine> {
        vec![IndicatorLine::new("rsi", rsi(&closes(data), self.period))]
    }
}
