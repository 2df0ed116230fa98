//! One fetch-classify run, from user input to a finished [`MarketReport`].

pub mod sink;
pub mod text;

use serde::Serialize;
use std::fmt;
#[cfg(debug_assertions)]
use std::time::Instant;

use crate::analysis::{Alignment, DirectionVerdict, check_alignment, classify};
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::REPORT;
use crate::data::{MarketDataClient, MarketDataError, OpenInterestSource};
use crate::domain::candle::is_strictly_increasing;
use crate::domain::order_book::{top_ask_levels_ranked, top_bid_levels};
use crate::domain::{
    AskRanking, BookSide, Candle, Interval, OpenInterestPoint, OrderBookLevel, OrderBookSnapshot,
    TradingPair,
};
use crate::utils::time_utils::local_now_as_timestamp_ms;

pub use sink::{ReportSink, present, present_outcome};
pub use text::TextSink;

/// Fatal to a run: nothing is charted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    DataUnavailable(String),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::DataUnavailable(msg) => write!(f, "No candle data: {}", msg),
        }
    }
}

impl std::error::Error for ReportError {}

/// Non-fatal conditions attached to a finished report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ReportWarning {
    OrderBookUnavailable(String),
    OpenInterestUnavailable(String),
    SyntheticOpenInterest,
    Misaligned {
        candle_ms: i64,
        open_interest_ms: i64,
        spacing_ms: i64,
    },
}

impl fmt::Display for ReportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportWarning::OrderBookUnavailable(msg) => {
                write!(f, "Order book unavailable, levels skipped: {}", msg)
            }
            ReportWarning::OpenInterestUnavailable(msg) => {
                write!(f, "Open interest unavailable: {}", msg)
            }
            ReportWarning::SyntheticOpenInterest => write!(
                f,
                "Open interest is randomly generated; the direction call is illustrative only"
            ),
            ReportWarning::Misaligned {
                candle_ms,
                open_interest_ms,
                spacing_ms,
            } => write!(
                f,
                "Open interest does not line up with candles (last candle {} ms, last OI {} ms, OI spacing {} ms)",
                candle_ms, open_interest_ms, spacing_ms
            ),
        }
    }
}

/// A horizontal price line drawn over the candle chart for one book level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayLine {
    pub price: f64,
    pub side: BookSide,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRequest {
    pub pair: TradingPair,
    pub interval: Interval,
    pub candle_limit: usize,
    pub top_levels: usize,
    pub open_interest_periods: usize,
    pub ask_ranking: AskRanking,
}

impl ReportRequest {
    /// Request with the configured defaults. Invalid pair text is a `DataUnavailable`.
    pub fn new(pair_text: &str, interval: Interval) -> Result<Self, ReportError> {
        let pair = TradingPair::parse(pair_text)
            .map_err(|e| ReportError::DataUnavailable(e.to_string()))?;
        Ok(Self {
            pair,
            interval,
            candle_limit: REPORT.candle_limit,
            top_levels: REPORT.top_levels,
            open_interest_periods: REPORT.open_interest_periods,
            ask_ranking: AskRanking::default(),
        })
    }

    pub fn with_candle_limit(mut self, limit: usize) -> Self {
        self.candle_limit = limit.max(1);
        self
    }

    pub fn with_ask_ranking(mut self, ranking: AskRanking) -> Self {
        self.ask_ranking = ranking;
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketReport {
    pub pair: TradingPair,
    pub interval: Interval,
    pub generated_at_ms: i64,
    pub candles: Vec<Candle>,
    pub open_interest: Vec<OpenInterestPoint>,
    pub open_interest_source: &'static str,
    pub top_bids: Vec<OrderBookLevel>,
    pub top_asks: Vec<OrderBookLevel>,
    /// Full snapshot behind the depth chart. Empty when the book fetch failed.
    pub order_book: OrderBookSnapshot,
    pub verdict: DirectionVerdict,
    pub warnings: Vec<ReportWarning>,
}

impl MarketReport {
    /// Price lines for the highlighted bid and ask levels.
    pub fn overlays(&self) -> Vec<OverlayLine> {
        let bids = self.top_bids.iter().map(|l| OverlayLine {
            price: l.price,
            side: BookSide::Bid,
            label: format!("Buy: {:.4}", l.price),
        });
        let asks = self.top_asks.iter().map(|l| OverlayLine {
            price: l.price,
            side: BookSide::Ask,
            label: format!("Sell: {:.4}", l.price),
        });
        bids.chain(asks).collect()
    }

    pub fn has_order_book(&self) -> bool {
        !self
            .warnings
            .iter()
            .any(|w| matches!(w, ReportWarning::OrderBookUnavailable(_)))
    }
}

/// Fetches candles, book and open interest concurrently, then classifies.
///
/// Only a candle failure aborts the run. Book and open interest failures are
/// recorded as warnings and the report carries empty series for them.
pub async fn build_report(
    client: &dyn MarketDataClient,
    open_interest_source: &dyn OpenInterestSource,
    request: &ReportRequest,
) -> Result<MarketReport, ReportError> {
    #[cfg(debug_assertions)]
    let started = Instant::now();
    let pair = &request.pair;

    let (candles, book, open_interest) = futures::join!(
        client.fetch_candles(pair, request.interval, request.candle_limit),
        client.fetch_order_book(pair),
        open_interest_source.fetch_open_interest(
            pair,
            request.interval,
            request.open_interest_periods
        ),
    );

    let candles = prepare_candles(candles, request.candle_limit)?;
    let mut warnings = Vec::new();

    let book = match book {
        Ok(book) => book,
        Err(e) => {
            log::warn!("⚠️  {}: {}", pair, e);
            warnings.push(ReportWarning::OrderBookUnavailable(error_detail(e)));
            OrderBookSnapshot::default()
        }
    };

    let open_interest = match open_interest {
        Ok(points) => points,
        Err(e) => {
            log::warn!("⚠️  {}: {}", pair, e);
            warnings.push(ReportWarning::OpenInterestUnavailable(error_detail(e)));
            Vec::new()
        }
    };
    if open_interest_source.is_synthetic() {
        warnings.push(ReportWarning::SyntheticOpenInterest);
    }

    if let Alignment::Misaligned {
        candle_ms,
        open_interest_ms,
        spacing_ms,
    } = check_alignment(&candles, &open_interest, request.interval)
    {
        let warning = ReportWarning::Misaligned {
            candle_ms,
            open_interest_ms,
            spacing_ms,
        };
        log::warn!("⚠️  {}: {}", pair, warning);
        warnings.push(warning);
    }

    let verdict = classify(&candles, &open_interest);
    let top_bids = top_bid_levels(&book, request.top_levels);
    let top_asks = top_ask_levels_ranked(&book, request.top_levels, request.ask_ranking);

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_report_timings {
        log::info!(
            "✅ {} {} report: {} candles, {} OI points, verdict '{}' in {:.2}s",
            pair,
            request.interval,
            candles.len(),
            open_interest.len(),
            verdict.headline,
            started.elapsed().as_secs_f32()
        );
    }

    Ok(MarketReport {
        pair: pair.clone(),
        interval: request.interval,
        generated_at_ms: local_now_as_timestamp_ms(),
        candles,
        open_interest,
        open_interest_source: open_interest_source.signature(),
        top_bids,
        top_asks,
        order_book: book,
        verdict,
        warnings,
    })
}

/// Orders candles by open time, drops duplicate bars and keeps the most recent `limit`.
fn prepare_candles(
    fetched: Result<Vec<Candle>, MarketDataError>,
    limit: usize,
) -> Result<Vec<Candle>, ReportError> {
    let mut candles = fetched.map_err(|e| ReportError::DataUnavailable(error_detail(e)))?;
    if candles.is_empty() {
        return Err(ReportError::DataUnavailable(
            "exchange returned no candles for the selected pair".to_string(),
        ));
    }

    candles.sort_by_key(|c| c.open_time_ms);
    candles.dedup_by_key(|c| c.open_time_ms);
    if candles.len() > limit {
        candles.drain(..candles.len() - limit);
    }
    debug_assert!(is_strictly_increasing(&candles));
    Ok(candles)
}

fn error_detail(e: MarketDataError) -> String {
    match e {
        MarketDataError::DataUnavailable(msg)
        | MarketDataError::OrderBookUnavailable(msg)
        | MarketDataError::OpenInterestUnavailable(msg) => msg,
    }
}


#[cfg(test)]
mod tests {
    use super::fakes::*;
    use super::*;
    use crate::analysis::Regime;

    fn real_oi(values: &[f64]) -> FakeOpenInterest {
        FakeOpenInterest {
            points: Ok(hourly_open_interest(values)),
            synthetic: false,
        }
    }

    #[tokio::test]
    async fn rising_price_and_open_interest_is_long_build_up() {
        let report = run(
            FakeMarket {
                candles: Ok(hourly_candles(&[100.0, 105.0])),
                book: Ok(sample_book()),
            },
            real_oi(&[2000.0, 2500.0]),
        )
        .await
        .unwrap();

        assert_eq!(report.verdict.regime, Regime::Bullish);
        assert_eq!(report.verdict.headline, "Long Build-up");
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
    }

    #[tokio::test]
    async fn falling_price_and_open_interest_is_long_unwinding() {
        let report = run(
            FakeMarket {
                candles: Ok(hourly_candles(&[105.0, 100.0])),
                book: Ok(sample_book()),
            },
            real_oi(&[2500.0, 2000.0]),
        )
        .await
        .unwrap();

        assert_eq!(report.verdict.regime, Regime::Bearish);
        assert_eq!(report.verdict.headline, "Long Unwinding");
    }

    #[tokio::test]
    async fn flat_price_is_neutral_whatever_open_interest_does() {
        for oi in [[2000.0, 2500.0], [2500.0, 2000.0]] {
            let report = run(
                FakeMarket {
                    candles: Ok(hourly_candles(&[100.0, 100.0])),
                    book: Ok(sample_book()),
                },
                real_oi(&oi),
            )
            .await
            .unwrap();
            assert_eq!(report.verdict.regime, Regime::Neutral);
        }
    }

    #[tokio::test]
    async fn candle_failure_aborts_the_run() {
        let err = run(
            FakeMarket {
                candles: Err(MarketDataError::DataUnavailable("bad symbol".to_string())),
                book: Ok(sample_book()),
            },
            real_oi(&[1.0, 2.0]),
        )
        .await
        .unwrap_err();
        assert_eq!(err, ReportError::DataUnavailable("bad symbol".to_string()));
    }

    #[tokio::test]
    async fn empty_candles_abort_the_run() {
        let result = run(
            FakeMarket {
                candles: Ok(Vec::new()),
                book: Ok(sample_book()),
            },
            real_oi(&[1.0, 2.0]),
        )
        .await;
        assert!(matches!(result, Err(ReportError::DataUnavailable(_))));
    }

    #[tokio::test]
    async fn order_book_failure_keeps_the_rest_of_the_report() {
        let report = run(
            FakeMarket {
                candles: Ok(hourly_candles(&[100.0, 105.0])),
                book: Err(MarketDataError::OrderBookUnavailable("timeout".to_string())),
            },
            real_oi(&[2000.0, 2500.0]),
        )
        .await
        .unwrap();

        assert!(report.top_bids.is_empty());
        assert!(report.top_asks.is_empty());
        assert!(report.overlays().is_empty());
        assert!(!report.has_order_book());
        assert_eq!(
            report.warnings,
            vec![ReportWarning::OrderBookUnavailable("timeout".to_string())]
        );
        assert_eq!(report.candles.len(), 2);
        assert_eq!(report.verdict.headline, "Long Build-up");
    }

    #[tokio::test]
    async fn open_interest_failure_degrades_to_insufficient_data() {
        let report = run(
            FakeMarket {
                candles: Ok(hourly_candles(&[100.0, 105.0])),
                book: Ok(sample_book()),
            },
            FakeOpenInterest {
                points: Err(MarketDataError::OpenInterestUnavailable("down".to_string())),
                synthetic: false,
            },
        )
        .await
        .unwrap();

        assert!(report.open_interest.is_empty());
        assert_eq!(report.verdict.headline, "insufficient data");
        assert!(matches!(
            report.warnings[0],
            ReportWarning::OpenInterestUnavailable(_)
        ));
    }

    #[tokio::test]
    async fn picks_top_levels_and_builds_overlays() {
        let report = run(
            FakeMarket {
                candles: Ok(hourly_candles(&[100.0, 101.0])),
                book: Ok(sample_book()),
            },
            real_oi(&[1.0, 2.0]),
        )
        .await
        .unwrap();

        let bid_sizes: Vec<f64> = report.top_bids.iter().map(|l| l.size).collect();
        let ask_sizes: Vec<f64> = report.top_asks.iter().map(|l| l.size).collect();
        assert_eq!(bid_sizes, vec![20.0, 8.0, 4.0]);
        assert_eq!(ask_sizes, vec![0.25, 1.5, 3.0]);

        let overlays = report.overlays();
        assert_eq!(overlays.len(), 6);
        assert_eq!(overlays[0].label, "Buy: 98.0000");
        assert_eq!(overlays[0].side, BookSide::Bid);
        assert_eq!(overlays[3].label, "Sell: 102.0000");
        assert_eq!(overlays[3].side, BookSide::Ask);
    }

    #[tokio::test]
    async fn largest_ask_ranking_flows_through_the_report() {
        let market = FakeMarket {
            candles: Ok(hourly_candles(&[100.0, 101.0])),
            book: Ok(sample_book()),
        };
        let request = ReportRequest::new("BTC/USDT", Interval::OneHour)
            .unwrap()
            .with_ask_ranking(AskRanking::LargestSize);
        let report = build_report(&market, &real_oi(&[1.0, 2.0]), &request)
            .await
            .unwrap();

        let ask_sizes: Vec<f64> = report.top_asks.iter().map(|l| l.size).collect();
        assert_eq!(ask_sizes, vec![50.0, 3.0, 1.5]);
        let bid_sizes: Vec<f64> = report.top_bids.iter().map(|l| l.size).collect();
        assert_eq!(bid_sizes, vec![20.0, 8.0, 4.0]);
        assert_eq!(report.overlays()[3].label, "Sell: 103.0000");
    }

    #[tokio::test]
    async fn synthetic_and_misaligned_open_interest_are_flagged() {
        let mut points = hourly_open_interest(&[1.0, 2.0]);
        // Spaced a day apart against hourly candles
        points[1].timestamp_ms = 24 * H;
        let report = run(
            FakeMarket {
                candles: Ok(hourly_candles(&[100.0, 101.0])),
                book: Ok(sample_book()),
            },
            FakeOpenInterest {
                points: Ok(points),
                synthetic: true,
            },
        )
        .await
        .unwrap();

        assert!(report.warnings.contains(&ReportWarning::SyntheticOpenInterest));
        assert!(
            report
                .warnings
                .iter()
                .any(|w| matches!(w, ReportWarning::Misaligned { .. }))
        );
        // Positional classification still runs
        assert_eq!(report.verdict.headline, "Long Build-up");
    }

    #[test]
    fn prepare_candles_sorts_dedups_and_keeps_latest() {
        let mut candles = hourly_candles(&[1.0, 2.0, 3.0, 4.0]);
        candles.swap(0, 3);
        candles.push(candles[1]);
        let prepared = prepare_candles(Ok(candles), 3).unwrap();
        let times: Vec<i64> = prepared.iter().map(|c| c.open_time_ms).collect();
        assert_eq!(times, vec![H, 2 * H, 3 * H]);
    }

    #[test]
    fn request_rejects_blank_pair() {
        assert!(matches!(
            ReportRequest::new("  ", Interval::OneHour),
            Err(ReportError::DataUnavailable(_))
        ));
        let request = ReportRequest::new("eth/usdt", Interval::FourHours)
            .unwrap()
            .with_candle_limit(0);
        assert_eq!(request.pair.bn_name(), "ETHUSDT");
        assert_eq!(request.candle_limit, 1);
        assert_eq!(request.top_levels, 3);
    }
}
