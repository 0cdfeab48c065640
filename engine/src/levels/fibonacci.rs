// Fibonacci retracement levels over a trailing window of bars
use shared::models::{Candle, FibonacciLevel};

pub const FIBONACCI_RATIOS: [f64; 7] = [0.0, 0.236, 0.382, 0.5, 0.618, 0.786, 1.0];

pub const DEFAULT_LOOKBACK: usize = 100;

/// Retracement prices between the highest high and lowest low of the last
/// `lookback` bars (the whole series when it is shorter).
///
/// `price = high - (high - low) * ratio`, so ratio 0 is the window high and
/// ratio 1 the window low. An empty window yields no levels.
pub fn fibonacci_levels(candles: &[Candle], lookback: usize) -> Vec<FibonacciLevel> {
    let window = &candles[candles.len().saturating_sub(lookback)..];
    if window.is_empty() {
        return Vec::new();
    }

    let high = window.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
    let low = window.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
    let diff = high - low;

    FIBONACCI_RATIOS
        .iter()
        .map(|&ratio| FibonacciLevel {
            level: ratio,
            price: high - diff * ratio,
            label: format!("{:.1}%", ratio * 100.0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(timestamp: i64, high: f64, low: f64) -> Candle {
        Candle::new(timestamp, low, high, low, high)
    }

    #[test]
    fn test_fibonacci_labels_and_prices() {
        let candles = vec![bar(1, 110.0, 100.0), bar(2, 200.0, 150.0), bar(3, 180.0, 120.0)];
        let levels = fibonacci_levels(&candles, DEFAULT_LOOKBACK);
        let labels: Vec<&str> = levels.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, ["0.0%", "23.6%", "38.2%", "50.0%", "61.8%", "78.6%", "100.0%"]);

        // high 200, low 100
        let prices: Vec<f64> = levels.iter().map(|l| l.price).collect();
        let expected = [200.0, 176.4, 161.8, 150.0, 138.2, 121.4, 100.0];
        for (p, e) in prices.iter().zip(expected) {
            assert!((p - e).abs() < 1e-9, "{} != {}", p, e);
        }
    }

    #[test]
    fn test_fibonacci_bounds_match_window_extremes() {
        let candles: Vec<Candle> = (0..250)
            .map(|i| {
                let mid = 100.0 + (i as f64 * 0.1).sin() * 20.0;
                bar(i, mid + 1.5, mid - 1.5)
            })
            .collect();
        let levels = fibonacci_levels(&candles, 100);
        let window = &candles[150..];
        let high = window.iter().map(|c| c.high).fold(f64::MIN, f64::max);
        let low = window.iter().map(|c| c.low).fold(f64::MAX, f64::min);
        assert_eq!(levels.first().unwrap().price, high);
        assert!((levels.last().unwrap().price - low).abs() < 1e-9);
    }

    #[test]
    fn test_fibonacci_lookback_limits_window() {
        // old spike outside the window must not count
        let candles = vec![bar(1, 500.0, 1.0), bar(2, 20.0, 10.0), bar(3, 30.0, 15.0)];
        let levels = fibonacci_levels(&candles, 2);
        assert_eq!(levels[0].price, 30.0);
        assert_eq!(levels[6].price, 10.0);
    }

    #[test]
    fn test_fibonacci_short_series_uses_everything() {
        let candles = vec![bar(1, 12.0, 8.0)];
        let levels = fibonacci_levels(&candles, 100);
        assert_eq!(levels.len(), 7);
        assert_eq!(levels[3].price, 10.0);
    }

    #[test]
    fn test_fibonacci_empty_input() {
        assert!(fibonacci_levels(&[], 100).is_empty());
        assert!(fibonacci_levels(&[bar(1, 2.0, 1.0)], 0).is_empty());
    }
}
