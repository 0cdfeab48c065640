// Candlestick pattern recognition
pub mod candlestick;

pub use candlestick::{detect_candlestick_patterns, PatternKind};
