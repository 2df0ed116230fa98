use serde::{Deserialize, Serialize};

use crate::domain::{Candle, Interval, OpenInterestPoint};

/// Whether the last two points of each series describe the same stretch of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    Aligned,
    Insufficient,
    Misaligned {
        candle_ms: i64,
        open_interest_ms: i64,
        spacing_ms: i64,
    },
}

impl Alignment {
    pub fn is_misaligned(&self) -> bool {
        matches!(self, Alignment::Misaligned { .. })
    }
}

/// Checks the open-interest series steps at `interval` and ends on the open
/// time of the last candle.
pub fn check_alignment(
    candles: &[Candle],
    open_interest: &[OpenInterestPoint],
    interval: Interval,
) -> Alignment {
    let (Some(last_candle), [.., oi_previous, oi_last]) = (candles.last(), open_interest) else {
        return Alignment::Insufficient;
    };
    if candles.len() < 2 {
        return Alignment::Insufficient;
    }

    let interval_ms = interval.to_ms();
    let spacing_ms = oi_last.timestamp_ms - oi_previous.timestamp_ms;
    if spacing_ms == interval_ms && oi_last.timestamp_ms == last_candle.open_time_ms {
        Alignment::Aligned
    } else {
        Alignment::Misaligned {
            candle_ms: last_candle.open_time_ms,
            open_interest_ms: oi_last.timestamp_ms,
            spacing_ms,
        }
    }
}
