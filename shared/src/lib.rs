// Data models shared between the engine and whatever renders its output.
pub mod models;
pub mod utils;

#[cfg(test)]
mod tests {
    use crate::models::{Candle, TimeFrame};

    #[test]
    fn candle_geometry() {
        let c = Candle::new(0, 10.0, 15.0, 8.0, 12.0);
        assert_eq!(c.body(), 2.0);
        assert_eq!(c.range(), 7.0);
        assert_eq!(c.upper_wick(), 3.0);
        assert_eq!(c.lower_wick(), 2.0);
        assert!(c.is_bullish());
        assert!(!c.is_bearish());
    }

    #[test]
    fn timeframe_round_trips_through_str() {
        for tf in [TimeFrame::Minute1, TimeFrame::Minute15, TimeFrame::Hour1, TimeFrame::Day1] {
            assert_eq!(tf.as_str().parse::<TimeFrame>().unwrap(), tf);
        }
        assert!("2w".parse::<TimeFrame>().is_err());
    }

    #[test]
    fn timeframe_deserializes_short_and_variant_names() {
        let short: TimeFrame = serde_json::from_str("\"1h\"").unwrap();
        let long: TimeFrame = serde_json::from_str("\"Hour1\"").unwrap();
        assert_eq!(short, TimeFrame::Hour1);
        assert_eq!(long, TimeFrame::Hour1);
        assert_eq!(serde_json::to_string(&TimeFrame::Day1).unwrap(), "\"Day1\"");
    }

    #[test]
    fn signal_serializes_lowercase() {
        let json = serde_json::to_string(&crate::models::Signal::Bullish).unwrap();
        assert_eq!(json, "\"bullish\"");
    }
}
