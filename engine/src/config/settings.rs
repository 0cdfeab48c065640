// Engine settings, loaded from an optional JSON file
use crate::error::EngineError;
use crate::levels::fibonacci::DEFAULT_LOOKBACK;
use serde::Deserialize;
use shared::models::TimeFrame;
use std::path::Path;

/// Default parameters used whenever a request does not name its own.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct IndicatorSettings {
    pub sma_period: usize,
    pub ema_period: usize,
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger_period: usize,
    pub bollinger_std_dev: f64,
    pub atr_period: usize,
    pub fibonacci_lookback: usize,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        IndicatorSettings {
            sma_period: 20,
            ema_period: 20,
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_period: 20,
            bollinger_std_dev: 2.0,
            atr_period: 14,
            fibonacci_lookback: DEFAULT_LOOKBACK,
        }
    }
}

impl IndicatorSettings {
    fn validate(&self) -> Result<(), EngineError> {
        let periods = [
            ("sma_period", self.sma_period),
            ("ema_period", self.ema_period),
            ("rsi_period", self.rsi_period),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("bollinger_period", self.bollinger_period),
            ("atr_period", self.atr_period),
            ("fibonacci_lookback", self.fibonacci_lookback),
        ];
        if let Some((name, _)) = periods.iter().find(|(_, value)| *value == 0) {
            return Err(EngineError::ConfigError(format!("indicators.{} must be greater than 0", name)));
        }
        if !self.bollinger_std_dev.is_finite() || self.bollinger_std_dev < 0.0 {
            return Err(EngineError::ConfigError(format!(
                "indicators.bollinger_std_dev must be a non-negative number, got {}",
                self.bollinger_std_dev
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DataSettings {
    pub csv_delimiter: char,
    pub default_timeframe: TimeFrame,
}

impl Default for DataSettings {
    fn default() -> Self {
        DataSettings {
            csv_delimiter: ',',
            default_timeframe: TimeFrame::Day1,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    pub indicators: IndicatorSettings,
    pub data: DataSettings,
}

impl EngineSettings {
    /// Reads settings from `path`, or returns the defaults when no path is
    /// given. Fields missing from the file keep their default values.
    pub fn load(path: Option<&Path>) -> Result<Self, EngineError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path).map_err(|e| {
            EngineError::ConfigError(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        let settings: EngineSettings = serde_json::from_str(&raw).map_err(|e| {
            EngineError::ConfigError(format!("Invalid config file '{}': {}", path.display(), e))
        })?;
        settings.validate()?;
        tracing::debug!(path = %path.display(), ?settings, "Loaded engine settings");
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        self.indicators.validate()?;
        if !self.data.csv_delimiter.is_ascii() {
            return Err(EngineError::ConfigError(format!(
                "data.csv_delimiter must be a single ASCII character, got '{}'",
                self.data.csv_delimiter
            )));
        }
        Ok(())
    }

    pub fn csv_delimiter_byte(&self) -> u8 {
        // validate() guarantees ASCII; fall back to ',' for hand-built settings
        u8::try_from(self.data.csv_delimiter).unwrap_or(b',')
    }
}
