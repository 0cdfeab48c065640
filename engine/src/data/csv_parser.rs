// CSV bar source: reads OHLC bars from delimited files
use crate::error::EngineError;
use anyhow::{anyhow, Context, Result};
use csv::{ReaderBuilder, StringRecord};
use shared::models::Candle;
use shared::utils::parse_timestamp_millis;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

const TIMESTAMP_HEADERS: [&str; 3] = ["timestamp", "time", "date"];

pub struct CsvBarSource;

impl CsvBarSource {
    // Header: timestamp,open,high,low,close (any order, case-insensitive,
    // extra columns ignored)
    // Example Row: 1704067200000,42283.58,42554.57,42261.02,42475.23
    pub fn load_candles_from_csv(file_path: &Path, delimiter: u8) -> Result<Vec<Candle>, EngineError> {
        let file = File::open(file_path)?;
        let candles = Self::read_candles(BufReader::new(file), delimiter)?;
        tracing::debug!(path = %file_path.display(), count = candles.len(), "Parsed candles from CSV");
        Ok(candles)
    }

    /// Parses bars from any reader and returns them sorted by timestamp.
    pub fn read_candles<R: Read>(reader: R, delimiter: u8) -> Result<Vec<Candle>, EngineError> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let columns = Columns::locate(&headers).map_err(|e| EngineError::CsvDataFormatError(e.to_string()))?;

        let mut candles = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let record = result?;
            let line = idx + 2; // 1-based, after the header row
            let candle = columns
                .parse(&record, line)
                .map_err(|e| EngineError::CsvDataFormatError(format!("{:#}", e)))?;
            candles.push(candle);
        }

        // Consumers index bars by position; keep them in time order.
        candles.sort_by_key(|c| c.timestamp);
        Ok(candles)
    }
}

struct Columns {
    timestamp: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self> {
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|header| names.iter().any(|name| header.eq_ignore_ascii_case(name)))
        };
        let require = |name: &str| find(&[name]).ok_or_else(|| anyhow!("Missing '{}' column in CSV header", name));

        Ok(Columns {
            timestamp: find(&TIMESTAMP_HEADERS)
                .ok_or_else(|| anyhow!("Missing 'timestamp' column in CSV header"))?,
            open: require("open")?,
            high: require("high")?,
            low: require("low")?,
            close: require("close")?,
        })
    }

    fn parse(&self, record: &StringRecord, line: usize) -> Result<Candle> {
        let field = |pos: usize, name: &str| {
            record
                .get(pos)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| anyhow!("Missing '{}' field at line {}", name, line))
        };
        let price = |pos: usize, name: &str| -> Result<f64> {
            let raw = field(pos, name)?;
            raw.parse::<f64>()
                .map_err(|e| anyhow!("Failed to parse decimal '{}': {}", raw, e))
                .with_context(|| format!("Error parsing '{}' at line {}", name, line))
        };

        let timestamp = parse_timestamp_millis(field(self.timestamp, "timestamp")?)
            .with_context(|| format!("Error parsing 'timestamp' at line {}", line))?;

        Ok(Candle {
            timestamp,
            open: price(self.open, "open")?,
            high: price(self.high, "high")?,
            low: price(self.low, "low")?,
            close: price(self.close, "close")?,
        })
    }
}
