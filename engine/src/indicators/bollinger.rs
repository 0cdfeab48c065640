// Bollinger Bands indicator implementation
use super::sma::sma;
use super::{closes, IndicatorCalculator};
use serde::Serialize;
use serde_json::Value;
use shared::models::{Candle, IndicatorLine, Series};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BollingerBands {
    pub upper: Series,
    pub middle: Series,
    pub lower: Series,
}

/// SMA envelope of `std_dev` population standard deviations.
///
/// The deviation is recomputed directly over each trailing window around the
/// SMA value at that index. Bands are `None` wherever the SMA is.
pub fn bollinger_bands(values: &[f64], period: usize, std_dev: f64) -> BollingerBands {
    let middle = sma(values, period);
    let mut upper = Vec::with_capacity(values.len());
    let mut lower = Vec::with_capacity(values.len());

    for (i, mean) in middle.iter().enumerate() {
        match mean {
            Some(mean) => {
                let window = &values[i + 1 - period..=i];
                let variance =
                    window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / period as f64;
                let width = std_dev * variance.sqrt();
                upper.push(Some(mean + width));
                lower.push(Some(mean - width));
            }
            None => {
                upper.push(None);
                lower.push(None);
            }
        }
    }

    BollingerBands { upper, middle, lower }
}

pub struct Bollinger {
    name: String,
    period: usize,
    std_dev: f64,
}

impl Bollinger {
    pub fn new(period: usize, std_dev: f64) -> Self {
        Self {
            name: format!("BB({},{})", period, std_dev),
            period,
            std_dev,
        }
    }
}

impl IndicatorCalculator for Bollinger {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period, "std_dev": self.std_dev })
    }

    fn calculate(&self, data: &[Candle]) -> Vec<IndicatorLine> {
        let bands = bollinger_bands(&closes(data), self.period, self.std_dev);
        vec![
            IndicatorLine::new("upper", bands.upper),
            IndicatorLine::new("middle", bands.middle),
            IndicatorLine::new("lower", bands.lower),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::assert_series_close;

    #[test]
    fn test_bollinger_pinned_window() {
        // window [2, 4, 4, 4, 5, 5, 7, 9]: mean 5, population std 2
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let bands = bollinger_bands(&values, 8, 2.0);
        assert!(bands.middle[..7].iter().all(Option::is_none));
        assert_series_close(&bands.middle[7..], &[Some(5.0)]);
        assert_series_close(&bands.upper[7..], &[Some(9.0)]);
        assert_series_close(&bands.lower[7..], &[Some(1.0)]);
    }

    #[test]
    fn test_bollinger_ordering() {
        let values: Vec<f64> = (0..80).map(|i| 50.0 + (i as f64 * 0.45).sin() * 8.0).collect();
        let bands = bollinger_bands(&values, 20, 2.0);
        for i in 0..values.len() {
            match (bands.lower[i], bands.middle[i], bands.upper[i]) {
                (Some(l), Some(m), Some(u)) => assert!(l <= m && m <= u, "index {}", i),
                (None, None, None) => assert!(i < 19),
                other => panic!("bands disagree at {}: {:?}", i, other),
            }
        }
    }

    #[test]
    fn test_bollinger_flat_series_collapses() {
        let bands = bollinger_bands(&[3.0; 5], 3, 2.0);
        assert_series_close(&bands.upper, &[None, None, Some(3.0), Some(3.0), Some(3.0)]);
        assert_series_close(&bands.lower, &[None, None, Some(3.0), Some(3.0), Some(3.0)]);
    }

    #[test]
    fn test_bollinger_warmup_boundary() {
        let short = bollinger_bands(&[1.0; 19], 20, 2.0);
        assert!(short.upper.iter().all(Option::is_none));
        assert_eq!(short.upper.len(), 19);

        let exact = bollinger_bands(&[1.0; 20], 20, 2.0);
        assert!(exact.upper[..19].iter().all(Option::is_none));
        assert_eq!(exact.upper[19], Some(1.0));
    }

    #[test]
    fn test_bollinger_empty_and_zero_period() {
        let empty = bollinger_bands(&[], 20, 2.0);
        assert!(empty.upper.is_empty() && empty.middle.is_empty() && empty.lower.is_empty());

        let zero = bollinger_bands(&[1.0, 2.0], 0, 2.0);
        assert_eq!(zero.middle, vec![None, None]);
        assert_eq!(zero.upper, vec![None, None]);
    }
}
