// Handler for computing a single named indicator
use std::sync::Arc;
use tokio::sync::RwLock;

use super::helpers::snapshot_candles;
use crate::config::settings::IndicatorSettings;
use crate::data::market_data::MarketDataStore;
use crate::error::EngineError;
use crate::indicators::build_calculator;
use crate::services::IndicatorRequest;
use shared::models::Indicator;

pub async fn handle_calculate_indicator(
    req_payload: IndicatorRequest,
    defaults: &IndicatorSettings,
    market_data_store: Arc<RwLock<MarketDataStore>>,
) -> Result<Indicator, EngineError> {
    tracing::debug!(symbol = %req_payload.symbol, indicator_type = %req_payload.indicator_type, "Handling indicator request");

    let params: serde_json::Value = if req_payload.parameters.trim().is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_str(&req_payload.parameters).map_err(|e| {
            tracing::error!(
                indicator_type = %req_payload.indicator_type,
                parameters = %req_payload.parameters,
                error_detail = ?e,
                "Invalid JSON parameters for indicator"
            );
            EngineError::IndicatorError(format!(
                "Invalid JSON parameters for indicator '{}': {}",
                req_payload.indicator_type, e
            ))
        })?
    };

    // Resolve the calculator first so bad requests fail without touching the store.
    let calculator = build_calculator(&req_payload.indicator_type, &params, defaults)?;
    let candles = snapshot_candles(&market_data_store, &req_payload.symbol, req_payload.timeframe).await?;

    Ok(calculator.evaluate(&candles))
}
