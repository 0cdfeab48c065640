// Bar sources and storage
pub mod csv_parser;
pub mod market_data;

pub use csv_parser::CsvBarSource;
pub use market_data::MarketDataStore;
