use std::io::{self, Write};

use crate::analysis::{DirectionVerdict, Regime};
use crate::domain::order_book::mirrored_depth;
use crate::domain::{
    BookSide, Candle, Interval, OpenInterestPoint, OrderBookLevel, OrderBookSnapshot, TradingPair,
};
use crate::report::{OverlayLine, ReportError, ReportWarning, ReportSink};
use crate::utils::time_utils::epoch_ms_to_utc;

/// Plain-text rendering for headless runs.
#[derive(Debug, Default)]
pub struct TextSink {
    out: String,
}

impl TextSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_string(self) -> String {
        self.out
    }

    /// Flushes everything rendered so far to `writer`.
    pub fn write_to(&self, writer: &mut impl Write) -> io::Result<()> {
        writer.write_all(self.out.as_bytes())?;
        writer.flush()
    }

    fn line(&mut self, text: impl AsRef<str>) {
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    fn level_column(&mut self, title: &str, levels: &[OrderBookLevel]) {
        self.line(title);
        if levels.is_empty() {
            self.line("  (no levels)");
        }
        for (i, level) in levels.iter().enumerate() {
            self.line(format!(
                "  Position {}: Price {:.4}, Volume {:.2}",
                i + 1,
                level.price,
                level.size.abs()
            ));
        }
    }
}

impl ReportSink for TextSink {
    fn render_warning(&mut self, warning: &ReportWarning) {
        self.line(format!("WARNING: {}", warning));
    }

    fn render_candles(
        &mut self,
        pair: &TradingPair,
        interval: Interval,
        candles: &[Candle],
        overlays: &[OverlayLine],
    ) {
        self.line(format!("== {} {} Candles ==", pair, interval));
        if let (Some(first), Some(last)) = (candles.first(), candles.last()) {
            let high = candles.iter().map(|c| c.high_price).fold(f64::MIN, f64::max);
            let low = candles.iter().map(|c| c.low_price).fold(f64::MAX, f64::min);
            self.line(format!(
                "{} candles from {} to {} UTC",
                candles.len(),
                epoch_ms_to_utc(first.open_time_ms),
                epoch_ms_to_utc(last.open_time_ms)
            ));
            self.line(format!(
                "Last: O {:.4} H {:.4} L {:.4} C {:.4}  Range: {:.4} - {:.4}",
                last.open_price, last.high_price, last.low_price, last.close_price, low, high
            ));
        }
        for overlay in overlays {
            let side = match overlay.side {
                BookSide::Bid => "bid",
                BookSide::Ask => "ask",
            };
            self.line(format!("  {} line  {}", side, overlay.label));
        }
    }

    fn render_levels(&mut self, bids: &[OrderBookLevel], asks: &[OrderBookLevel]) {
        self.line("== Order Book ==");
        self.level_column("Top bids:", bids);
        self.level_column("Top asks:", asks);
    }

    fn render_depth(&mut self, book: &OrderBookSnapshot) {
        let (mut bid_total, mut ask_total) = (0.0, 0.0);
        for (side, [_, signed_size]) in mirrored_depth(book) {
            match side {
                BookSide::Bid => bid_total += signed_size.abs(),
                BookSide::Ask => ask_total += signed_size.abs(),
            }
        }
        self.line(format!(
            "Depth: {} bids totaling {:.2}, {} asks totaling {:.2}",
            book.bids.len(),
            bid_total,
            book.asks.len(),
            ask_total
        ));
    }

    fn render_open_interest(
        &mut self,
        pair: &TradingPair,
        series: &[OpenInterestPoint],
        source: &str,
    ) {
        self.line(format!("== {} Open Interest ({}) ==", pair, source));
        match series {
            [] => self.line("No open interest points"),
            [.., previous, last] => self.line(format!(
                "{} points, last {:.2} at {} UTC (change {:+.2})",
                series.len(),
                last.value,
                epoch_ms_to_utc(last.timestamp_ms),
                last.value - previous.value
            )),
            [only] => self.line(format!(
                "1 point: {:.2} at {} UTC",
                only.value,
                epoch_ms_to_utc(only.timestamp_ms)
            )),
        }
    }

    fn render_verdict(&mut self, verdict: &DirectionVerdict) {
        let tag = match verdict.regime {
            Regime::Bullish => "[UP]",
            Regime::Bearish => "[DOWN]",
            Regime::Neutral => "[FLAT]",
        };
        self.line(format!("== Verdict == {} {}", tag, verdict.headline));
        self.line(&verdict.rationale);
    }

    fn render_error(&mut self, error: &ReportError) {
        self.line(format!("ERROR: {}", error));
    }
}
