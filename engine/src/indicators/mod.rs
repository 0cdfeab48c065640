// Technical indicators module
pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use atr::{atr, Atr};
pub use bollinger::{bollinger_bands, Bollinger, BollingerBands};
pub use ema::{ema, Ema};
pub use macd::{macd, Macd, MacdOutput};
pub use rsi::{rsi, Rsi};
pub use sma::{sma, Sma};

use crate::config::settings::IndicatorSettings;
use crate::error::EngineError;
use serde_json::Value;
use shared::models::{Candle, Indicator, IndicatorLine};

// Common trait for all indicators. Every line returned by `calculate` has the
// same length as `data`; `None` marks positions where the indicator is not
// defined yet.
pub trait IndicatorCalculator: Send + Sync {
    fn name(&self) -> &str;
    fn parameters(&self) -> Value; // Parameters used for this indicator instance
    fn calculate(&self, data: &[Candle]) -> Vec<IndicatorLine>;

    fn evaluate(&self, data: &[Candle]) -> Indicator {
        Indicator {
            name: self.name().to_string(),
            parameters: self.parameters(),
            lines: self.calculate(data),
        }
    }
}

/// Closing prices of `data`, in order.
pub fn closes(data: &[Candle]) -> Vec<f64> {
    data.iter().map(|c| c.close).collect()
}

fn period_param(params: &Value, key: &str, default: usize) -> Result<usize, EngineError> {
    let period = match params.get(key) {
        None | Some(Value::Null) => default,
        Some(v) => v.as_u64().ok_or_else(|| {
            EngineError::IndicatorError(format!("Parameter '{}' must be a positive integer, got {}", key, v))
        })? as usize,
    };
    if period == 0 {
        return Err(EngineError::IndicatorError(format!("Indicator parameter '{}' cannot be 0", key)));
    }
    Ok(period)
}

fn float_param(params: &Value, key: &str, default: f64) -> Result<f64, EngineError> {
    match params.get(key) {
        None | Some(Value::Null) => Ok(default),
        Some(v) => v.as_f64().ok_or_else(|| {
            EngineError::IndicatorError(format!("Parameter '{}' must be a number, got {}", key, v))
        }),
    }
}

/// Builds a calculator from a kind name (`sma`, `ema`, `rsi`, `macd`,
/// `bollinger`, `atr`) and JSON parameters. Missing parameters fall back to
/// `defaults`.
pub fn build_calculator(
    kind: &str,
    params: &Value,
    defaults: &IndicatorSettings,
) -> Result<Box<dyn IndicatorCalculator>, EngineError> {
    let calculator: Box<dyn IndicatorCalculator> = match kind.trim().to_lowercase().as_str() {
        "sma" => Box::new(Sma::new(period_param(params, "period", defaults.sma_period)?)),
        "ema" => Box::new(Ema::new(period_param(params, "period", defaults.ema_period)?)),
        "rsi" => Box::new(Rsi::new(period_param(params, "period", defaults.rsi_period)?)),
        "macd" => Box::new(Macd::new(
            period_param(params, "fast", defaults.macd_fast)?,
            period_param(params, "slow", defaults.macd_slow)?,
            period_param(params, "signal", defaults.macd_signal)?,
        )),
        "bollinger" | "bollinger_bands" | "bb" => {
            let period = period_param(params, "period", defaults.bollinger_period)?;
            let std_dev = float_param(params, "std_dev", defaults.bollinger_std_dev)?;
            // A negative width would put the lower band above the upper one.
            if !std_dev.is_finite() || std_dev < 0.0 {
                return Err(EngineError::IndicatorError(format!(
                    "Parameter 'std_dev' must be a non-negative number, got {}",
                    std_dev
                )));
            }
            Box::new(Bollinger::new(period, std_dev))
        }
        "atr" => Box::new(Atr::new(period_param(params, "period", defaults.atr_period)?)),
        _ => {
            tracing::error!(indicator_type = %kind, "Unknown indicator type requested");
            return Err(EngineError::IndicatorError(format!("Unknown indicator type: {}", kind)));
        }
    };
    Ok(calculator)
}


#[cfg(test)]
mod tests {
    use super::*;
    use test_support::create_candle;

    fn candles(n: usize) -> Vec<Candle> {
        (0..n).map(|i| create_candle(10.0 + (i % 7) as f64)).collect()
    }

    #[test]
    fn test_build_calculator_defaults() {
        let defaults = IndicatorSettings::default();
        let calc = build_calculator("RSI", &Value::Null, &defaults).unwrap();
        assert_eq!(calc.name(), "RSI(14)");
        let calc = build_calculator("macd", &serde_json::json!({}), &defaults).unwrap();
        assert_eq!(calc.name(), "MACD(12,26,9)");
        let calc = build_calculator("bb", &serde_json::json!({}), &defaults).unwrap();
        assert_eq!(calc.parameters(), serde_json::json!({ "period": 20, "std_dev": 2.0 }));
    }

    #[test]
    fn test_build_calculator_overrides() {
        let defaults = IndicatorSettings::default();
        let calc = build_calculator("sma", &serde_json::json!({ "period": 5 }), &defaults).unwrap();
        assert_eq!(calc.name(), "SMA(5)");
        let calc = build_calculator(
            "macd",
            &serde_json::json!({ "fast": 3, "slow": 6, "signal": 2 }),
            &defaults,
        )
        .unwrap();
        assert_eq!(calc.parameters(), serde_json::json!({ "fast": 3, "slow": 6, "signal": 2 }));
    }

    #[test]
    fn test_build_calculator_rejects_zero_period() {
        let defaults = IndicatorSettings::default();
        let err = build_calculator("ema", &serde_json::json!({ "period": 0 }), &defaults)
            .err()
            .unwrap();
        assert!(err.to_string().contains("cannot be 0"));
    }

    #[test]
    fn test_build_calculator_rejects_bad_values() {
        let defaults = IndicatorSettings::default();
        assert!(build_calculator("sma", &serde_json::json!({ "period": "ten" }), &defaults).is_err());
        assert!(build_calculator("bb", &serde_json::json!({ "std_dev": "wide" }), &defaults).is_err());
        let err = build_calculator("bb", &serde_json::json!({ "period": 3, "std_dev": -2.0 }), &defaults)
            .err()
            .unwrap();
        assert!(err.to_string().contains("'std_dev' must be a non-negative number"));
        let err = build_calculator("vwap", &Value::Null, &defaults).err().unwrap();
        assert!(err.to_string().contains("Unknown indicator type: vwap"));
    }

    #[test]
    fn test_every_calculator_keeps_input_length() {
        let defaults = IndicatorSettings::default();
        for kind in ["sma", "ema", "rsi", "macd", "bollinger", "atr"] {
            let calc = build_calculator(kind, &Value::Null, &defaults).unwrap();
            for n in [0, 1, 2, 13, 14, 15, 40] {
                let data = candles(n);
                for line in calc.calculate(&data) {
                    assert_eq!(line.values.len(), n, "{} line {} on {} bars", kind, line.label, n);
                }
            }
        }
    }

    #[test]
    fn test_bollinger_from_params_keeps_band_order() {
        let defaults = IndicatorSettings::default();
        let data: Vec<Candle> = [1.0, 5.0, 2.0, 8.0].iter().map(|&c| create_candle(c)).collect();
        let calc = build_calculator("bb", &serde_json::json!({ "period": 3, "std_dev": 0.0 }), &defaults).unwrap();
        let lines = calc.calculate(&data);
        for i in 2..data.len() {
            let upper = lines[0].values[i].unwrap();
            let lower = lines[2].values[i].unwrap();
            assert!(lower <= upper, "index {}: lower {} > upper {}", i, lower, upper);
        }
    }

    #[test]
    fn test_evaluate_wraps_lines() {
        let indicator = Sma::new(2).evaluate(&candles(3));
        assert_eq!(indicator.name, "SMA(2)");
        assert_eq!(indicator.line("sma").unwrap().values.len(), 3);
        assert!(indicator.line("ema").is_none());
    }
}
