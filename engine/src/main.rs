// market-indicators: loads a bar file and prints the engine's output as JSON
use clap::Parser;
use engine::config::settings::EngineSettings;
use engine::data::market_data::MarketDataStore;
use engine::error::EngineError;
use engine::services::{AnalysisService, IndicatorRequest, LoadCsvRequest};
use shared::models::TimeFrame;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "market-indicators", version, about = "Technical indicators and candlestick patterns over OHLC bar files")]
struct Cli {
    /// CSV file with timestamp,open,high,low,close columns
    #[arg(long)]
    csv: PathBuf,

    /// Symbol the bars belong to
    #[arg(long, default_value = "DEFAULT")]
    symbol: String,

    /// Bar interval: 1m, 5m, 15m, 30m, 1h or 1d (defaults to the configured timeframe)
    #[arg(long)]
    timeframe: Option<TimeFrame>,

    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Compute only this indicator (sma, ema, rsi, macd, bollinger, atr)
    #[arg(long)]
    indicator: Option<String>,

    /// JSON parameters for --indicator, e.g. '{"period": 14}'
    #[arg(long, default_value = "", requires = "indicator")]
    params: String,

    /// Print only the candlestick patterns
    #[arg(long, conflicts_with = "indicator")]
    patterns: bool,

    /// Re-read the file every N seconds and recompute everything
    #[arg(long, value_name = "SECONDS")]
    watch: Option<u64>,
}

async fn refresh(service: &AnalysisService, cli: &Cli, timeframe: TimeFrame) -> Result<String, EngineError> {
    service
        .load_csv_data(LoadCsvRequest {
            file_path: cli.csv.display().to_string(),
            symbol: cli.symbol.clone(),
            timeframe,
        })
        .await?;

    let json = if let Some(kind) = &cli.indicator {
        let indicator = service
            .calculate_indicator(IndicatorRequest {
                symbol: cli.symbol.clone(),
                timeframe,
                indicator_type: kind.clone(),
                parameters: cli.params.clone(),
            })
            .await?;
        serde_json::to_string_pretty(&indicator)?
    } else if cli.patterns {
        serde_json::to_string_pretty(&service.detect_patterns(&cli.symbol, timeframe).await?)?
    } else {
        serde_json::to_string_pretty(&service.analyze(&cli.symbol, timeframe).await?)?
    };
    Ok(json)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout carries only JSON.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let settings = EngineSettings::load(cli.config.as_deref())?;
    let timeframe = cli.timeframe.unwrap_or(settings.data.default_timeframe);

    info!(path = %cli.csv.display(), symbol = %cli.symbol, %timeframe, "Starting market-indicators");

    let market_data_store = Arc::new(RwLock::new(MarketDataStore::new()));
    let service = AnalysisService::new(market_data_store, settings);

    let Some(seconds) = cli.watch else {
        println!("{}", refresh(&service, &cli, timeframe).await?);
        return Ok(());
    };

    let mut interval = tokio::time::interval(Duration::from_secs(seconds.max(1)));
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping watch");
                break;
            }
            _ = interval.tick() => {
                // A bad refresh keeps the loop alive; the next tick retries.
                match refresh(&service, &cli, timeframe).await {
                    Ok(json) => println!("{}", json),
                    Err(e) => warn!(error = %e, "Refresh failed"),
                }
            }
        }
    }
    Ok(())
}
