// AnalysisService: the caller-side owner of the bar store. Each request
// snapshots the stored series and recomputes from scratch.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::settings::EngineSettings;
use crate::data::market_data::MarketDataStore;
use crate::error::EngineError;
use crate::models::AnalysisReport;
use crate::services::{IndicatorRequest, LoadCsvRequest, LoadCsvResponse};
use shared::models::{CandlestickPattern, Indicator, TimeFrame};

pub mod analyze;
pub mod calculate_indicator;
pub mod detect_patterns;
pub mod helpers;
pub mod load_csv_data;

pub struct AnalysisService {
    market_data_store: Arc<RwLock<MarketDataStore>>,
    settings: EngineSettings,
}

impl AnalysisService {
    pub fn new(market_data_store: Arc<RwLock<MarketDataStore>>, settings: EngineSettings) -> Self {
        AnalysisService { market_data_store, settings }
    }

    pub async fn load_csv_data(&self, request: LoadCsvRequest) -> Result<LoadCsvResponse, EngineError> {
        tracing::info!(
            symbol = %request.symbol,
            path = %request.file_path,
            timeframe = %request.timeframe,
            "Received LoadCsvRequest, dispatching to handler."
        );
        load_csv_data::handle_load_csv_data(request, self.settings.csv_delimiter_byte(), self.market_data_store.clone()).await
    }

    pub async fn calculate_indicator(&self, request: IndicatorRequest) -> Result<Indicator, EngineError> {
        tracing::info!(
            symbol = %request.symbol,
            indicator_type = %request.indicator_type,
            parameters = %request.parameters,
            "Received IndicatorRequest, dispatching to handler."
        );
        calculate_indicator::handle_calculate_indicator(request, &self.settings.indicators, self.market_data_store.clone()).await
    }

    pub async fn detect_patterns(&self, symbol: &str, timeframe: TimeFrame) -> Result<Vec<CandlestickPattern>, EngineError> {
        tracing::info!(symbol = %symbol, %timeframe, "Received pattern scan request, dispatching to handler.");
        detect_patterns::handle_detect_patterns(symbol, timeframe, self.market_data_store.clone()).await
    }

    pub async fn analyze(&self, symbol: &str, timeframe: TimeFrame) -> Result<AnalysisReport, EngineError> {
        tracing::info!(symbol = %symbol, %timeframe, "Received analysis request, dispatching to handler.");
        analyze::handle_analyze(symbol, timeframe, &self.settings.indicators, self.market_data_store.clone()).await
    }
}
