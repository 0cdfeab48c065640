// Helper functions shared by the analysis handlers
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::data::market_data::MarketDataStore;
use crate::error::EngineError;
use shared::models::{Candle, TimeFrame};

/// Clones the stored series so computation can run without holding the lock.
///
/// A pair that was never loaded is an error; a loaded but empty series is
/// returned as-is and produces empty results downstream.
pub async fn snapshot_candles(
    market_data_store: &Arc<RwLock<MarketDataStore>>,
    symbol: &str,
    timeframe: TimeFrame,
) -> Result<Vec<Candle>, EngineError> {
    let store = market_data_store.read().await;
    let candles = store.get_candles(symbol, timeframe, None, None);
    let loaded = match &candles {
        Some(_) => String::new(),
        None if store.is_empty() => "no bars loaded".to_string(),
        None => format!("loaded symbols: {}", store.symbols().join(", ")),
    };
    drop(store); // Explicitly drop lock after data retrieval

    match candles {
        Some(candles) => {
            if candles.is_empty() {
                tracing::warn!(symbol = %symbol, ?timeframe, "Stored series is empty");
            }
            Ok(candles)
        }
        None => {
            tracing::warn!(symbol = %symbol, ?timeframe, "No candle data found");
            Err(EngineError::MarketDataError(format!(
                "No candle data found for symbol '{}' and timeframe {} ({})",
                symbol, timeframe, loaded
            )))
        }
    }
}
