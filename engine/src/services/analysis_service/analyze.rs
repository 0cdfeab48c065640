// Handler for the full batch analysis of one series
use std::sync::Arc;
use tokio::sync::RwLock;

use super::helpers::snapshot_candles;
use crate::config::settings::IndicatorSettings;
use crate::data::market_data::MarketDataStore;
use crate::error::EngineError;
use crate::indicators::{Atr, Bollinger, Ema, IndicatorCalculator, Macd, Rsi, Sma};
use crate::levels::fibonacci_levels;
use crate::models::AnalysisReport;
use crate::patterns::detect_candlestick_patterns;
use shared::models::{Candle, TimeFrame};

/// Runs every indicator, the Fibonacci levels and the pattern scan over the
/// full series. Nothing carries over between calls.
pub fn run_analysis(symbol: &str, timeframe: TimeFrame, candles: &[Candle], settings: &IndicatorSettings) -> AnalysisReport {
    let calculators: Vec<Box<dyn IndicatorCalculator>> = vec![
        Box::new(Sma::new(settings.sma_period)),
        Box::new(Ema::new(settings.ema_period)),
        Box::new(Rsi::new(settings.rsi_period)),
        Box::new(Macd::new(settings.macd_fast, settings.macd_slow, settings.macd_signal)),
        Box::new(Bollinger::new(settings.bollinger_period, settings.bollinger_std_dev)),
        Box::new(Atr::new(settings.atr_period)),
    ];

    AnalysisReport {
        symbol: symbol.to_string(),
        timeframe,
        bars: candles.len(),
        timestamps: candles.iter().map(|c| c.timestamp).collect(),
        indicators: calculators.iter().map(|calc| calc.evaluate(candles)).collect(),
        fibonacci: fibonacci_levels(candles, settings.fibonacci_lookback),
        patterns: detect_candlestick_patterns(candles).collect(),
    }
}

pub async fn handle_analyze(
    symbol: &str,
    timeframe: TimeFrame,
    settings: &IndicatorSettings,
    market_data_store: Arc<RwLock<MarketDataStore>>,
) -> Result<AnalysisReport, EngineError> {
    let candles = snapshot_candles(&market_data_store, symbol, timeframe).await?;
    let report = run_analysis(symbol, timeframe, &candles, settings);
    tracing::debug!(
        symbol = %symbol,
        ?timeframe,
        bars = report.bars,
        patterns = report.patterns.len(),
        "Analysis recomputed"
    );
    Ok(report)
}
