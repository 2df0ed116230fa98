use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

use crate::config::REPORT;
use crate::data::error::MarketDataError;
use crate::domain::{Interval, OpenInterestPoint, TradingPair};
use crate::utils::time_utils::local_now_as_timestamp_ms;

/// Source of open interest readings for a pair.
///
/// The classifier compares the last two points of this series against the
/// last two candles, so implementations must emit points at `interval` cadence.
#[async_trait]
pub trait OpenInterestSource: Send + Sync {
    /// `periods` points, oldest first, one per `interval`.
    async fn fetch_open_interest(
        &self,
        pair: &TradingPair,
        interval: Interval,
        periods: usize,
    ) -> Result<Vec<OpenInterestPoint>, MarketDataError>;

    /// True when the values are not real market data.
    fn is_synthetic(&self) -> bool;

    fn signature(&self) -> &'static str;
}

/// Placeholder feed: uniformly random integer values, unrelated to the market.
/// Stands in until a real exchange open interest feed is wired up.
pub struct SyntheticOpenInterest {
    rng: Mutex<StdRng>,
    min_value: u32,
    max_value: u32,
}

impl SyntheticOpenInterest {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Reproducible series, for tests and `--seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
            min_value: REPORT.synthetic_open_interest.min_value,
            max_value: REPORT.synthetic_open_interest.max_value,
        }
    }

    /// Generates `periods` points ending at the open time of the bar containing `end_ms`.
    pub fn generate(
        &self,
        interval: Interval,
        periods: usize,
        end_ms: i64,
    ) -> Result<Vec<OpenInterestPoint>, MarketDataError> {
        let interval_ms = interval.to_ms();
        let last_ms = interval.open_time_containing(end_ms);
        let first_ms = last_ms - interval_ms * periods.saturating_sub(1) as i64;

        let mut rng = self.rng.lock().map_err(|_| {
            MarketDataError::OpenInterestUnavailable("synthetic generator lock poisoned".to_string())
        })?;

        Ok((0..periods)
            .map(|i| {
                let value = rng.random_range(self.min_value..self.max_value);
                OpenInterestPoint::new(first_ms + i as i64 * interval_ms, value as f64)
            })
            .collect())
    }
}

impl Default for SyntheticOpenInterest {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OpenInterestSource for SyntheticOpenInterest {
    async fn fetch_open_interest(
        &self,
        pair: &TradingPair,
        interval: Interval,
        periods: usize,
    ) -> Result<Vec<OpenInterestPoint>, MarketDataError> {
        log::debug!("Generating {} synthetic open interest points for {}", periods, pair);
        self.generate(interval, periods, local_now_as_timestamp_ms())
    }

    fn is_synthetic(&self) -> bool {
        true
    }

    fn signature(&self) -> &'static str {
        "Synthetic (random)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Alignment, check_alignment};
    use crate::domain::Candle;
    use crate::utils::TimeUtils;
    use crate::utils::time_utils::floor_to_interval;

    const END_MS: i64 = 1_700_000_123_456;

    #[test]
    fn emits_requested_periods_at_interval_cadence() {
        let source = SyntheticOpenInterest::seeded(7);
        let points = source.generate(Interval::FifteenMinutes, 100, END_MS).unwrap();
        assert_eq!(points.len(), 100);
        assert!(
            points
                .windows(2)
                .all(|w| w[1].timestamp_ms - w[0].timestamp_ms == Interval::FifteenMinutes.to_ms())
        );
        assert_eq!(
            points.last().unwrap().timestamp_ms,
            floor_to_interval(END_MS, Interval::FifteenMinutes.to_ms())
        );
    }

    #[test]
    fn weekly_series_lands_on_monday_bar_opens() {
        let monday = 1_704_672_000_000;
        let source = SyntheticOpenInterest::seeded(5);
        let points = source
            .generate(Interval::OneWeek, 3, monday + 2 * TimeUtils::MS_IN_D)
            .unwrap();
        assert_eq!(points.last().unwrap().timestamp_ms, monday);
        assert_eq!(points[0].timestamp_ms, monday - 2 * TimeUtils::MS_IN_W);

        let candles: Vec<Candle> = [monday - TimeUtils::MS_IN_W, monday]
            .iter()
            .map(|&t| Candle::new(t, 1.0, 1.0, 1.0, 1.0, 1.0))
            .collect();
        assert_eq!(
            check_alignment(&candles, &points, Interval::OneWeek),
            Alignment::Aligned
        );
    }

    #[test]
    fn values_stay_in_configured_range() {
        let source = SyntheticOpenInterest::seeded(42);
        let points = source.generate(Interval::OneHour, 500, END_MS).unwrap();
        assert!(points.iter().all(|p| (1000.0..5000.0).contains(&p.value)));
        assert!(points.iter().all(|p| p.value.fract() == 0.0));
    }

    #[test]
    fn same_seed_gives_same_series() {
        let a = SyntheticOpenInterest::seeded(3)
            .generate(Interval::OneHour, 20, END_MS)
            .unwrap();
        let b = SyntheticOpenInterest::seeded(3)
            .generate(Interval::OneHour, 20, END_MS)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_periods_is_empty() {
        let source = SyntheticOpenInterest::seeded(1);
        assert!(source.generate(Interval::OneDay, 0, END_MS).unwrap().is_empty());
    }

    #[tokio::test]
    async fn trait_fetch_reports_synthetic() {
        let source = SyntheticOpenInterest::seeded(9);
        let pair = TradingPair::parse("BTC/USDT").unwrap();
        let points = source
            .fetch_open_interest(&pair, Interval::OneHour, 5)
            .await
            .unwrap();
        assert_eq!(points.len(), 5);
        assert!(source.is_synthetic());
    }
}
