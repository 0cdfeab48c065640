// Service layer: owns the shared bar store and runs the engine over it.
pub mod analysis_service;

pub use analysis_service::AnalysisService;

use serde::{Deserialize, Serialize};
use shared::models::TimeFrame;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadCsvRequest {
    pub file_path: String,
    pub symbol: String,
    pub timeframe: TimeFrame,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCsvResponse {
    pub message: String,
    pub candles_loaded: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorRequest {
    pub symbol: String,
    pub timeframe: TimeFrame,
    pub indicator_type: String,
    /// JSON object, e.g. `{"period": 14}`. Empty means defaults.
    pub parameters: String,
}
