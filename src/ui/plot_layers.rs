use eframe::egui::{RichText, Stroke};
use egui_plot::{BoxElem, BoxPlot, BoxSpread, HLine, LineStyle, PlotPoint, PlotUi, Text};

use crate::config::plot::PLOT_CONFIG;
use crate::domain::candle::CandleType;
use crate::domain::{BookSide, Candle};
use crate::report::OverlayLine;
use crate::ui::ui_text::UI_TEXT;

/// Context passed to every layer during rendering.
/// This prevents argument explosion.
pub struct LayerContext<'a> {
    pub candles: &'a [Candle],
    pub overlays: &'a [OverlayLine],
    pub interval_ms: f64,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// A standardized layer in the plot stack.
pub trait PlotLayer {
    fn render(&self, ui: &mut PlotUi, ctx: &LayerContext);
}

// ============================================================================
// 1. WATERMARK (drawn first so everything else sits on top)
// ============================================================================
pub struct WatermarkLayer;

impl PlotLayer for WatermarkLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let center = PlotPoint::new(
            (ctx.x_min + ctx.x_max) / 2.0,
            (ctx.y_min + ctx.y_max) / 2.0,
        );
        let text = RichText::new(PLOT_CONFIG.watermark_text)
            .size(48.0)
            .strong()
            .color(PLOT_CONFIG.watermark_color);
        plot_ui.text(Text::new("watermark", center, text));
    }
}

// ============================================================================
// 2. CANDLES (box plot: whiskers are wicks, box is the body)
// ============================================================================
pub struct CandleLayer;

impl PlotLayer for CandleLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let body_width = ctx.interval_ms * PLOT_CONFIG.candle_body_width_pct;

        for (kind, name, color) in [
            (
                CandleType::Bullish,
                UI_TEXT.legend_bullish,
                PLOT_CONFIG.bullish_candle_color,
            ),
            (
                CandleType::Bearish,
                UI_TEXT.legend_bearish,
                PLOT_CONFIG.bearish_candle_color,
            ),
        ] {
            let boxes: Vec<BoxElem> = ctx
                .candles
                .iter()
                .filter(|c| c.get_type() == kind)
                .map(|c| {
                    let (body_low, body_high) = c.body_range();
                    let spread = BoxSpread::new(
                        c.low_price,
                        body_low,
                        (body_low + body_high) / 2.0,
                        body_high,
                        c.high_price,
                    );
                    BoxElem::new(candle_center_x(c, ctx.interval_ms), spread)
                        .box_width(body_width)
                        .whisker_width(0.0)
                        .fill(color)
                        .stroke(Stroke::new(1.0, color))
                })
                .collect();

            if !boxes.is_empty() {
                plot_ui.box_plot(BoxPlot::new(name, boxes));
            }
        }
    }
}

// ============================================================================
// 3. ORDER BOOK LEVEL LINES
// ============================================================================
pub struct OrderBookLinesLayer;

impl PlotLayer for OrderBookLinesLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        for overlay in ctx.overlays {
            let color = match overlay.side {
                BookSide::Bid => PLOT_CONFIG.bid_line_color,
                BookSide::Ask => PLOT_CONFIG.ask_line_color,
            };
            plot_ui.hline(
                HLine::new(overlay.label.as_str(), overlay.price)
                    .color(color)
                    .width(PLOT_CONFIG.level_line_width)
                    .style(LineStyle::dashed_loose()),
            );
        }
    }
}

/// Candles are plotted at the middle of their interval.
pub fn candle_center_x(candle: &Candle, interval_ms: f64) -> f64 {
    candle.open_time_ms as f64 + interval_ms / 2.0
}
