use crate::analysis::DirectionVerdict;
use crate::domain::{
    Candle, Interval, OpenInterestPoint, OrderBookLevel, OrderBookSnapshot, TradingPair,
};
use crate::report::{MarketReport, OverlayLine, ReportError, ReportWarning};

/// Somewhere a finished run can be shown: the egui panels, a terminal, a test recorder.
pub trait ReportSink {
    fn render_warning(&mut self, warning: &ReportWarning);

    fn render_candles(
        &mut self,
        pair: &TradingPair,
        interval: Interval,
        candles: &[Candle],
        overlays: &[OverlayLine],
    );

    /// Levels carry positive sizes on both sides.
    fn render_levels(&mut self, bids: &[OrderBookLevel], asks: &[OrderBookLevel]);

    /// Whole book for a depth view. Skipped by sinks without one.
    fn render_depth(&mut self, _book: &OrderBookSnapshot) {}

    fn render_open_interest(
        &mut self,
        pair: &TradingPair,
        series: &[OpenInterestPoint],
        source: &str,
    );

    fn render_verdict(&mut self, verdict: &DirectionVerdict);

    fn render_error(&mut self, error: &ReportError);
}

/// Feeds a report to `sink` in display order, warnings first and verdict last.
pub fn present(report: &MarketReport, sink: &mut dyn ReportSink) {
    for warning in &report.warnings {
        sink.render_warning(warning);
    }
    sink.render_candles(
        &report.pair,
        report.interval,
        &report.candles,
        &report.overlays(),
    );
    if report.has_order_book() {
        sink.render_levels(&report.top_bids, &report.top_asks);
        sink.render_depth(&report.order_book);
    }
    sink.render_open_interest(&report.pair, &report.open_interest, report.open_interest_source);
    sink.render_verdict(&report.verdict);
}

/// A failed run only reaches `render_error`.
pub fn present_outcome(outcome: &Result<MarketReport, ReportError>, sink: &mut dyn ReportSink) {
    match outcome {
        Ok(report) => present(report, sink),
        Err(e) => sink.render_error(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MarketDataError;
    use crate::report::fakes::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
        overlay_count: usize,
    }

    impl ReportSink for Recorder {
        fn render_warning(&mut self, _warning: &ReportWarning) {
            self.calls.push("warning");
        }

        fn render_candles(
            &mut self,
            _pair: &TradingPair,
            _interval: Interval,
            _candles: &[Candle],
            overlays: &[OverlayLine],
        ) {
            self.overlay_count = overlays.len();
            self.calls.push("candles");
        }

        fn render_levels(&mut self, _bids: &[OrderBookLevel], _asks: &[OrderBookLevel]) {
            self.calls.push("levels");
        }

        fn render_open_interest(
            &mut self,
            _pair: &TradingPair,
            _series: &[OpenInterestPoint],
            _source: &str,
        ) {
            self.calls.push("open_interest");
        }

        fn render_verdict(&mut self, _verdict: &DirectionVerdict) {
            self.calls.push("verdict");
        }

        fn render_error(&mut self, _error: &ReportError) {
            self.calls.push("error");
        }
    }

    #[tokio::test]
    async fn presents_sections_in_order() {
        let outcome = run(
            FakeMarket {
                candles: Ok(hourly_candles(&[1.0, 2.0])),
                book: Ok(sample_book()),
            },
            FakeOpenInterest {
                points: Ok(hourly_open_interest(&[1.0, 2.0])),
                synthetic: true,
            },
        )
        .await;

        let mut recorder = Recorder::default();
        present_outcome(&outcome, &mut recorder);
        assert_eq!(
            recorder.calls,
            vec!["warning", "candles", "levels", "open_interest", "verdict"]
        );
        assert_eq!(recorder.overlay_count, 6);
    }

    #[tokio::test]
    async fn skips_levels_when_book_is_missing() {
        let outcome = run(
            FakeMarket {
                candles: Ok(hourly_candles(&[1.0, 2.0])),
                book: Err(MarketDataError::OrderBookUnavailable("503".to_string())),
            },
            FakeOpenInterest {
                points: Ok(hourly_open_interest(&[1.0, 2.0])),
                synthetic: false,
            },
        )
        .await;

        let mut recorder = Recorder::default();
        present_outcome(&outcome, &mut recorder);
        assert_eq!(
            recorder.calls,
            vec!["warning", "candles", "open_interest", "verdict"]
        );
        assert_eq!(recorder.overlay_count, 0);
    }

    #[tokio::test]
    async fn failed_run_only_renders_the_error() {
        let outcome = run(
            FakeMarket {
                candles: Err(MarketDataError::DataUnavailable("unknown symbol".to_string())),
                book: Ok(sample_book()),
            },
            FakeOpenInterest {
                points: Ok(Vec::new()),
                synthetic: false,
            },
        )
        .await;

        let mut recorder = Recorder::default();
        present_outcome(&outcome, &mut recorder);
        assert_eq!(recorder.calls, vec!["error"]);
    }
}
