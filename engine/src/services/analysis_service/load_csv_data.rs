// Handler for loading a CSV bar file into the store
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::data::csv_parser::CsvBarSource;
use crate::data::market_data::MarketDataStore;
use crate::error::EngineError;
use crate::services::{LoadCsvRequest, LoadCsvResponse};
use shared::utils::millis_to_datetime;

pub async fn handle_load_csv_data(
    req_payload: LoadCsvRequest,
    delimiter: u8,
    market_data_store: Arc<RwLock<MarketDataStore>>,
) -> Result<LoadCsvResponse, EngineError> {
    let path = PathBuf::from(&req_payload.file_path);

    // File reads block; keep them off the async workers.
    let candles = tokio::task::spawn_blocking(move || CsvBarSource::load_candles_from_csv(&path, delimiter))
        .await
        .map_err(anyhow::Error::from)??;

    let first_bar = candles.first().and_then(|c| millis_to_datetime(c.timestamp));
    let last_bar = candles.last().and_then(|c| millis_to_datetime(c.timestamp));

    let mut store = market_data_store.write().await;
    let candles_loaded = store.replace_candles(&req_payload.symbol, req_payload.timeframe, candles);
    drop(store);

    tracing::info!(
        symbol = %req_payload.symbol,
        timeframe = %req_payload.timeframe,
        count = candles_loaded,
        first = ?first_bar,
        last = ?last_bar,
        "Replaced stored series from CSV"
    );

    Ok(LoadCsvResponse {
        message: format!("Loaded {} candles for symbol {}", candles_loaded, req_payload.symbol),
        candles_loaded,
    })
}
