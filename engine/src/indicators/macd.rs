// Moving Average Convergence/Divergence (MACD) indicator implementation
use super::ema::ema;
use super::{closes, IndicatorCalculator};
use serde::Serialize;
use serde_json::Value;
use shared::models::{Candle, IndicatorLine, Series};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacdOutput {
    pub macd: Series,
    pub signal: Series,
    pub histogram: Series,
}

/// Element-wise `a - b` where both sides are defined.
fn difference(a: &[Option<f64>], b: &[Option<f64>]) -> Series {
    a.iter()
        .zip(b)
        .map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) => Some(x - y),
            _ => None,
        })
        .collect()
}

/// Drops the `None` entries of `sparse`, runs `f` over the dense values and
/// writes the results back to the positions they came from.
///
/// `f` must return one value per input value; positions that were `None` in
/// `sparse` stay `None`.
pub(crate) fn scatter_compacted<F>(sparse: &[Option<f64>], f: F) -> Series
where
    F: FnOnce(&[f64]) -> Series,
{
    let compacted: Vec<f64> = sparse.iter().flatten().copied().collect();
    let dense = f(&compacted);

    let mut cursor = 0;
    sparse
        .iter()
        .map(|entry| {
            entry.and_then(|_| {
                let value = dense.get(cursor).copied().flatten();
                cursor += 1;
                value
            })
        })
        .collect()
}

/// MACD line, signal line and histogram.
///
/// Both EMAs are defined from the first bar, so the MACD line has no warm-up
/// either. The signal EMA runs over the compacted MACD values and is scattered
/// back onto the MACD positions.
pub fn macd(values: &[f64], fast: usize, slow: usize, signal_period: usize) -> MacdOutput {
    let fast_ema = ema(values, fast);
    let slow_ema = ema(values, slow);
    let macd_line = difference(&fast_ema, &slow_ema);
    let signal_line = scatter_compacted(&macd_line, |dense| ema(dense, signal_period));
    let histogram = difference(&macd_line, &signal_line);

    MacdOutput {
        macd: macd_line,
        signal: signal_line,
        histogram,
    }
}

pub struct Macd {
    name: String,
    fast: usize,
    slow: usize,
    signal: usize,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        Self {
            name: format!("MACD({},{},{})", fast, slow, signal),
            fast,
            slow,
            signal,
        }
    }
}

impl IndicatorCalculator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "fast": self.fast, "slow": self.slow, "signal": self.signal })
    }

    fn calculate(&self, data: &[Candle]) -> Vec<IndicatorLine> {
        let output = macd(&closes(data), self.fast, self.slow, self.signal);
        vec![
            IndicatorLine::new("macd", output.macd),
            IndicatorLine::new("signal", output.signal),
            IndicatorLine::new("histogram", output.histogram),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::assert_series_close;

    fn sample_closes() -> Vec<f64> {
        (0..60).map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0 + i as f64 * 0.1).collect()
    }

    #[test]
    fn test_scatter_compacted_realigns_by_position() {
        let sparse = [None, Some(1.0), None, Some(2.0), Some(3.0)];
        // running sum makes each slot depend on its dense neighbours
        let result = scatter_compacted(&sparse, |dense| {
            let mut acc = 0.0;
            dense.iter().map(|v| { acc += v; Some(acc) }).collect()
        });
        assert_eq!(result, vec![None, Some(1.0), None, Some(3.0), Some(6.0)]);
    }

    #[test]
    fn test_scatter_compacted_keeps_inner_gaps() {
        let sparse = [Some(1.0), Some(2.0), Some(3.0)];
        let result = scatter_compacted(&sparse, |dense| {
            dense.iter().map(|v| if *v == 2.0 { None } else { Some(v * 10.0) }).collect()
        });
        assert_eq!(result, vec![Some(10.0), None, Some(30.0)]);
    }

    #[test]
    fn test_scatter_compacted_all_absent() {
        let result = scatter_compacted(&[None, None], |dense| {
            assert!(dense.is_empty());
            Vec::new()
        });
        assert_eq!(result, vec![None, None]);
    }

    #[test]
    fn test_macd_defined_from_first_bar() {
        let values = sample_closes();
        let output = macd(&values, 12, 26, 9);
        assert_eq!(output.macd.len(), values.len());
        assert_eq!(output.signal.len(), values.len());
        assert_eq!(output.histogram.len(), values.len());
        assert_eq!(output.macd[0], Some(0.0));
        assert!(output.macd.iter().all(Option::is_some));
        assert!(output.signal.iter().all(Option::is_some));
    }

    #[test]
    fn test_macd_line_is_fast_minus_slow() {
        let values = sample_closes();
        let output = macd(&values, 12, 26, 9);
        let fast = ema(&values, 12);
        let slow = ema(&values, 26);
        for i in 0..values.len() {
            let expected = fast[i].unwrap() - slow[i].unwrap();
            assert!((output.macd[i].unwrap() - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_macd_histogram_identity() {
        let output = macd(&sample_closes(), 12, 26, 9);
        for i in 0..output.macd.len() {
            if let (Some(m), Some(s)) = (output.macd[i], output.signal[i]) {
                assert!((output.histogram[i].unwrap() - (m - s)).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_macd_small_pinned() {
        // fast k = 2/3, slow k = 0.5, signal k = 2/3
        // fast: 1, 1.6667, 2.5556   slow: 1, 1.5, 2.25
        // macd: 0, 0.16667, 0.30556
        // signal: 0, 0.11111, 0.24074
        let output = macd(&[1.0, 2.0, 3.0], 2, 3, 2);
        assert_series_close(&output.macd, &[Some(0.0), Some(1.0 / 6.0), Some(11.0 / 36.0)]);
        assert_series_close(&output.signal, &[Some(0.0), Some(1.0 / 9.0), Some(13.0 / 54.0)]);
        assert_series_close(
            &output.histogram,
            &[Some(0.0), Some(1.0 / 18.0), Some(11.0 / 36.0 - 13.0 / 54.0)],
        );
    }

    #[test]
    fn test_macd_empty_data() {
        let output = macd(&[], 12, 26, 9);
        assert!(output.macd.is_empty());
        assert!(output.signal.is_empty());
        assert!(output.histogram.is_empty());
    }

    #[test]
    fn test_macd_calculator_lines() {
        let calc = Macd::new(12, 26, 9);
        assert_eq!(calc.name(), "MACD(12,26,9)");
        let lines = calc.calculate(&[]);
        let labels: Vec<&str> = lines.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, ["macd", "signal", "histogram"]);
    }
}
