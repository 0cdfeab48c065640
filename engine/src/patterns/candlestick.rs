//! Three-bar candlestick pattern heuristics.
//!
//! Every bar from index 2 onwards is checked against all patterns using the
//! bar itself (`current`), the bar before it (`prev`) and the one before that
//! (`prev2`). Patterns are not exclusive: several can fire on the same bar.
//! Strengths are fixed heuristic scores, not calibrated probabilities.

use shared::models::{Candle, CandlestickPattern, Signal};

pub const DOJI_STRENGTH: f64 = 0.6;
pub const HAMMER_STRENGTH: f64 = 0.8;
pub const SHOOTING_STAR_STRENGTH: f64 = 0.8;
pub const ENGULFING_STRENGTH: f64 = 0.9;
pub const STAR_STRENGTH: f64 = 0.95;

/// Doji body must be under this share of the bar's range.
const DOJI_BODY_RATIO: f64 = 0.1;
/// Hammer / shooting star: long wick must exceed this multiple of the body.
const LONG_WICK_RATIO: f64 = 2.0;
/// Hammer / shooting star: opposite wick must stay under this multiple of the body.
const SHORT_WICK_RATIO: f64 = 0.3;
const ENGULFING_BODY_RATIO: f64 = 1.2;
/// Star middle bar body, relative to the first bar's body.
const STAR_BODY_RATIO: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Doji,
    Hammer,
    ShootingStar,
    BullishEngulfing,
    BearishEngulfing,
    MorningStar,
    EveningStar,
}

impl PatternKind {
    pub const ALL: [PatternKind; 7] = [
        PatternKind::Doji,
        PatternKind::Hammer,
        PatternKind::ShootingStar,
        PatternKind::BullishEngulfing,
        PatternKind::BearishEngulfing,
        PatternKind::MorningStar,
        PatternKind::EveningStar,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            PatternKind::Doji => "doji",
            PatternKind::Hammer => "hammer",
            PatternKind::ShootingStar => "shooting_star",
            PatternKind::BullishEngulfing => "bullish_engulfing",
            PatternKind::BearishEngulfing => "bearish_engulfing",
            PatternKind::MorningStar => "morning_star",
            PatternKind::EveningStar => "evening_star",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PatternKind::Doji => "Doji",
            PatternKind::Hammer => "Hammer",
            PatternKind::ShootingStar => "Shooting Star",
            PatternKind::BullishEngulfing => "Bullish Engulfing",
            PatternKind::BearishEngulfing => "Bearish Engulfing",
            PatternKind::MorningStar => "Morning Star",
            PatternKind::EveningStar => "Evening Star",
        }
    }

    pub fn signal(&self) -> Signal {
        match self {
            PatternKind::Doji => Signal::Neutral,
            PatternKind::Hammer | PatternKind::BullishEngulfing | PatternKind::MorningStar => Signal::Bullish,
            PatternKind::ShootingStar | PatternKind::BearishEngulfing | PatternKind::EveningStar => Signal::Bearish,
        }
    }

    pub fn strength(&self) -> f64 {
        match self {
            PatternKind::Doji => DOJI_STRENGTH,
            PatternKind::Hammer => HAMMER_STRENGTH,
            PatternKind::ShootingStar => SHOOTING_STAR_STRENGTH,
            PatternKind::BullishEngulfing | PatternKind::BearishEngulfing => ENGULFING_STRENGTH,
            PatternKind::MorningStar | PatternKind::EveningStar => STAR_STRENGTH,
        }
    }

    pub fn matches(&self, prev2: &Candle, prev: &Candle, current: &Candle) -> bool {
        match self {
            PatternKind::Doji => is_doji(current),
            PatternKind::Hammer => is_hammer(current),
            PatternKind::ShootingStar => is_shooting_star(current),
            PatternKind::BullishEngulfing => is_bullish_engulfing(prev, current),
            PatternKind::BearishEngulfing => is_bearish_engulfing(prev, current),
            PatternKind::MorningStar => is_morning_star(prev2, prev, current),
            PatternKind::EveningStar => is_evening_star(prev2, prev, current),
        }
    }

    fn at(&self, timestamp: i64) -> CandlestickPattern {
        CandlestickPattern {
            pattern_type: self.tag().to_string(),
            name: self.display_name().to_string(),
            timestamp,
            signal: self.signal(),
            strength: self.strength(),
        }
    }
}

fn is_doji(c: &Candle) -> bool {
    c.body() < c.range() * DOJI_BODY_RATIO
}

fn is_hammer(c: &Candle) -> bool {
    let body = c.body();
    c.is_bullish() && c.lower_wick() > body * LONG_WICK_RATIO && c.upper_wick() < body * SHORT_WICK_RATIO
}

fn is_shooting_star(c: &Candle) -> bool {
    let body = c.body();
    c.is_bearish() && c.upper_wick() > body * LONG_WICK_RATIO && c.lower_wick() < body * SHORT_WICK_RATIO
}

fn is_bullish_engulfing(prev: &Candle, current: &Candle) -> bool {
    prev.is_bearish()
        && current.is_bullish()
        && current.body() > prev.body() * ENGULFING_BODY_RATIO
        && current.open < prev.close
        && current.close > prev.open
}

fn is_bearish_engulfing(prev: &Candle, current: &Candle) -> bool {
    prev.is_bullish()
        && current.is_bearish()
        && current.body() > prev.body() * ENGULFING_BODY_RATIO
        && current.open > prev.close
        && current.close < prev.open
}

fn midpoint(c: &Candle) -> f64 {
    (c.open + c.close) / 2.0
}

fn is_morning_star(prev2: &Candle, prev: &Candle, current: &Candle) -> bool {
    prev2.is_bearish()
        && prev.body() < prev2.body() * STAR_BODY_RATIO
        && current.is_bullish()
        && current.close > midpoint(prev2)
}

fn is_evening_star(prev2: &Candle, prev: &Candle, current: &Candle) -> bool {
    prev2.is_bullish()
        && prev.body() < prev2.body() * STAR_BODY_RATIO
        && current.is_bearish()
        && current.close < midpoint(prev2)
}

/// Lazily yields every pattern match in `candles`, ordered by bar and then
/// by [`PatternKind::ALL`]. Bars 0 and 1 never match. Each call starts a
/// fresh scan.
pub fn detect_candlestick_patterns(candles: &[Candle]) -> impl Iterator<Item = CandlestickPattern> + '_ {
    (2..candles.len()).flat_map(move |i| {
        let (prev2, prev, current) = (&candles[i - 2], &candles[i - 1], &candles[i]);
        PatternKind::ALL
            .into_iter()
            .filter(move |kind| kind.matches(prev2, prev, current))
            .map(move |kind| kind.at(current.timestamp))
    })
}
