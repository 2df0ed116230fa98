//! Market direction from the joint motion of price and open interest.
//!
//! Only the last two points of each series matter. A rising price with rising
//! open interest means fresh longs, a falling price with rising open interest
//! means fresh shorts, and a falling open interest on either move means one
//! side is closing out. Anything with a zero move is left as neutral.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{Candle, OpenInterestPoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Regime {
    Bullish,
    Bearish,
    Neutral,
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Regime::Bullish => "bullish",
            Regime::Bearish => "bearish",
            Regime::Neutral => "neutral",
        };
        write!(f, "{}", text)
    }
}

/// The five narratives a price/open-interest move can map to, plus the
/// degenerate case where there is not enough data to tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketPattern {
    LongBuildUp,
    ShortCovering,
    ShortBuildUp,
    LongUnwinding,
    Neutral,
    InsufficientData,
}

impl MarketPattern {
    pub fn regime(self) -> Regime {
        match self {
            MarketPattern::LongBuildUp | MarketPattern::ShortCovering => Regime::Bullish,
            MarketPattern::ShortBuildUp | MarketPattern::LongUnwinding => Regime::Bearish,
            MarketPattern::Neutral | MarketPattern::InsufficientData => Regime::Neutral,
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            MarketPattern::LongBuildUp => "Long Build-up",
            MarketPattern::ShortCovering => "Short Covering",
            MarketPattern::ShortBuildUp => "Short Build-up",
            MarketPattern::LongUnwinding => "Long Unwinding",
            MarketPattern::Neutral => "Neutral",
            MarketPattern::InsufficientData => "insufficient data",
        }
    }

    pub fn rationale(self) -> &'static str {
        match self {
            MarketPattern::LongBuildUp => {
                "price and open interest both rise → new long positions accumulating"
            }
            MarketPattern::ShortCovering => {
                "price rises while open interest falls → short positions being closed"
            }
            MarketPattern::ShortBuildUp => {
                "price falls while open interest rises → new short positions accumulating"
            }
            MarketPattern::LongUnwinding => {
                "price falls while open interest falls → long positions being closed"
            }
            MarketPattern::Neutral => {
                "no definable pattern in price/open-interest co-movement"
            }
            MarketPattern::InsufficientData => "insufficient data for direction analysis",
        }
    }

    /// Exact sign comparison. Zero and NaN deltas never match a directional arm.
    pub fn from_deltas(price_delta: f64, oi_delta: f64) -> Self {
        if price_delta > 0.0 && oi_delta > 0.0 {
            MarketPattern::LongBuildUp
        } else if price_delta > 0.0 && oi_delta < 0.0 {
            MarketPattern::ShortCovering
        } else if price_delta < 0.0 && oi_delta > 0.0 {
            MarketPattern::ShortBuildUp
        } else if price_delta < 0.0 && oi_delta < 0.0 {
            MarketPattern::LongUnwinding
        } else {
            MarketPattern::Neutral
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionVerdict {
    pub regime: Regime,
    pub pattern: MarketPattern,
    pub headline: String,
    pub rationale: String,
}

impl From<MarketPattern> for DirectionVerdict {
    fn from(pattern: MarketPattern) -> Self {
        Self {
            regime: pattern.regime(),
            pattern,
            headline: pattern.headline().to_string(),
            rationale: pattern.rationale().to_string(),
        }
    }
}

impl DirectionVerdict {
    pub fn insufficient_data() -> Self {
        MarketPattern::InsufficientData.into()
    }
}

/// Classifies the last move of `candles` against the last move of `open_interest`.
pub fn classify(candles: &[Candle], open_interest: &[OpenInterestPoint]) -> DirectionVerdict {
    let price_delta = last_delta(candles, |c| c.close_price);
    let oi_delta = last_delta(open_interest, |p| p.value);

    match (price_delta, oi_delta) {
        (Some(price_delta), Some(oi_delta)) => {
            MarketPattern::from_deltas(price_delta, oi_delta).into()
        }
        _ => DirectionVerdict::insufficient_data(),
    }
}

fn last_delta<T>(series: &[T], value: impl Fn(&T) -> f64) -> Option<f64> {
    match series {
        [.., previous, last] => Some(value(last) - value(previous)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candles(closes: &[f64]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle::new(i as i64 * 3_600_000, close, close, close, close, 1.0))
            .collect()
    }

    fn open_interest(values: &[f64]) -> Vec<OpenInterestPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| OpenInterestPoint::new(i as i64 * 3_600_000, v))
            .collect()
    }

    #[test]
    fn each_sign_pair_maps_to_its_narrative() {
        let cases = [
            (100.0, 105.0, 2000.0, 2500.0, Regime::Bullish, "Long Build-up"),
            (100.0, 105.0, 2500.0, 2000.0, Regime::Bullish, "Short Covering"),
            (105.0, 100.0, 2000.0, 2500.0, Regime::Bearish, "Short Build-up"),
            (105.0, 100.0, 2500.0, 2000.0, Regime::Bearish, "Long Unwinding"),
        ];

        for (p0, p1, oi0, oi1, regime, headline) in cases {
            let verdict = classify(&candles(&[p0, p1]), &open_interest(&[oi0, oi1]));
            assert_eq!(verdict.regime, regime, "{}", headline);
            assert_eq!(verdict.headline, headline);
        }
    }

    #[test]
    fn zero_delta_on_either_side_is_neutral() {
        for oi in [[2000.0, 2500.0], [2500.0, 2000.0], [2000.0, 2000.0]] {
            let verdict = classify(&candles(&[100.0, 100.0]), &open_interest(&oi));
            assert_eq!(verdict.regime, Regime::Neutral);
            assert_eq!(verdict.headline, "Neutral");
        }
        for closes in [[100.0, 105.0], [105.0, 100.0]] {
            let verdict = classify(&candles(&closes), &open_interest(&[2000.0, 2000.0]));
            assert_eq!(verdict.pattern, MarketPattern::Neutral);
        }
    }

    #[test]
    fn empty_series_yield_insufficient_data() {
        let expected = DirectionVerdict {
            regime: Regime::Neutral,
            pattern: MarketPattern::InsufficientData,
            headline: "insufficient data".to_string(),
            rationale: "insufficient data for direction analysis".to_string(),
        };
        assert_eq!(classify(&[], &open_interest(&[1.0, 2.0])), expected);
        assert_eq!(classify(&candles(&[1.0, 2.0]), &[]), expected);
        assert_eq!(classify(&[], &[]), expected);
    }

    #[test]
    fn single_point_series_yield_insufficient_data() {
        let verdict = classify(&candles(&[100.0]), &open_interest(&[1.0, 2.0]));
        assert_eq!(verdict.pattern, MarketPattern::InsufficientData);
        let verdict = classify(&candles(&[100.0, 101.0]), &open_interest(&[1.0]));
        assert_eq!(verdict.pattern, MarketPattern::InsufficientData);
    }

    #[test]
    fn only_the_last_two_points_count() {
        // Long history falling, last step rising on both
        let verdict = classify(
            &candles(&[200.0, 150.0, 90.0, 100.0]),
            &open_interest(&[9000.0, 5000.0, 1000.0, 1200.0]),
        );
        assert_eq!(verdict.pattern, MarketPattern::LongBuildUp);
    }

    #[test]
    fn nan_delta_falls_through_to_neutral() {
        let verdict = classify(&candles(&[100.0, f64::NAN]), &open_interest(&[1.0, 2.0]));
        assert_eq!(verdict.pattern, MarketPattern::Neutral);
    }

    #[test]
    fn classification_is_idempotent() {
        let c = candles(&[100.0, 105.0]);
        let oi = open_interest(&[2000.0, 2500.0]);
        assert_eq!(classify(&c, &oi), classify(&c, &oi));
    }

    #[test]
    fn end_to_end_long_unwinding() {
        let verdict = classify(&candles(&[105.0, 100.0]), &open_interest(&[2500.0, 2000.0]));
        assert_eq!(verdict.regime, Regime::Bearish);
        assert_eq!(verdict.headline, "Long Unwinding");
        assert_eq!(
            verdict.rationale,
            "price falls while open interest falls → long positions being closed"
        );
    }
}
