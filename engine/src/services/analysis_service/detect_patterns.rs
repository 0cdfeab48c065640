// Handler for candlestick pattern scans
use std::sync::Arc;
use tokio::sync::RwLock;

use super::helpers::snapshot_candles;
use crate::data::market_data::MarketDataStore;
use crate::error::EngineError;
use crate::patterns::detect_candlestick_patterns;
use shared::models::{CandlestickPattern, TimeFrame};

pub async fn handle_detect_patterns(
    symbol: &str,
    timeframe: TimeFrame,
    market_data_store: Arc<RwLock<MarketDataStore>>,
) -> Result<Vec<CandlestickPattern>, EngineError> {
    let candles = snapshot_candles(&market_data_store, symbol, timeframe).await?;
    let patterns: Vec<CandlestickPattern> = detect_candlestick_patterns(&candles).collect();
    tracing::debug!(symbol = %symbol, ?timeframe, count = patterns.len(), "Pattern scan finished");
    Ok(patterns)
}
