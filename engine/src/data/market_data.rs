// In-memory bar store, one series per symbol and timeframe
use shared::models::{Candle, TimeFrame};
use std::collections::HashMap;

/// Holds the latest bar series for each `(symbol, timeframe)`.
///
/// A refresh hands over the complete series, which replaces whatever was
/// stored before; there is no append path.
pub struct MarketDataStore {
    data: HashMap<String, HashMap<TimeFrame, Vec<Candle>>>,
}

impl MarketDataStore {
    pub fn new() -> Self {
        MarketDataStore {
            data: HashMap::new(),
        }
    }

    /// Replaces the stored series and returns the number of bars now held.
    pub fn replace_candles(&mut self, symbol: &str, timeframe: TimeFrame, mut candles: Vec<Candle>) -> usize {
        candles.sort_by_key(|c| c.timestamp);
        let count = candles.len();
        self.data
            .entry(symbol.to_string())
            .or_default()
            .insert(timeframe, candles);
        count
    }

    /// Bars for `symbol`/`timeframe`, optionally limited to an inclusive
    /// millisecond range. `None` when nothing was ever stored for the pair.
    pub fn get_candles(&self, symbol: &str, timeframe: TimeFrame, from_timestamp: Option<i64>, to_timestamp: Option<i64>) -> Option<Vec<Candle>> {
        self.data.get(symbol)
            .and_then(|symbol_data| symbol_data.get(&timeframe))
            .map(|candles| {
                candles.iter()
                    .filter(|c| from_timestamp.map_or(true, |start| c.timestamp >= start))
                    .filter(|c| to_timestamp.map_or(true, |end| c.timestamp <= end))
                    .copied()
                    .collect()
            })
    }

    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        symbols
    }

    /// Number of bars stored for the pair, zero when unknown.
    pub fn len(&self, symbol: &str, timeframe: TimeFrame) -> usize {
        self.data
            .get(symbol)
            .and_then(|symbol_data| symbol_data.get(&timeframe))
            .map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.data.values().all(|frames| frames.values().all(Vec::is_empty))
    }
}

impl Default for MarketDataStore {
    fn default() -> Self {
        Self::new()
    }
}
