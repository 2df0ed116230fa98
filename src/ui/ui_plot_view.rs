use std::hash::{Hash, Hasher};

use eframe::egui::{self, Color32};
use egui_plot::{AxisHints, Bar, BarChart, Corner, HPlacement, Legend, Line, Plot, PlotPoints};

use crate::config::plot::PLOT_CONFIG;
use crate::domain::order_book::mirrored_depth;
use crate::domain::{BookSide, Candle, Interval, OpenInterestPoint, OrderBookSnapshot, TradingPair};
use crate::report::OverlayLine;
use crate::ui::plot_layers::{
    CandleLayer, LayerContext, OrderBookLinesLayer, PlotLayer, WatermarkLayer,
};
use crate::ui::ui_text::UI_TEXT;
use crate::ui::utils::{format_price, format_volume};
use crate::utils::time_utils::epoch_ms_to_short_utc;

/// Axis bounds of the candle chart, recomputed only when its inputs change.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotCache {
    pub key: u64,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

#[derive(Default)]
pub struct PlotView {
    cache: Option<PlotCache>,
}

impl PlotView {
    pub fn new() -> Self {
        Self { cache: None }
    }

    pub fn clear_cache(&mut self) {
        self.cache = None;
    }

    pub fn show_candle_plot(
        &mut self,
        ui: &mut egui::Ui,
        pair: &TradingPair,
        interval: Interval,
        candles: &[Candle],
        overlays: &[OverlayLine],
    ) {
        let Some(cache) = self.candle_bounds(pair, interval, candles, overlays) else {
            return;
        };
        let interval_ms = interval.to_ms() as f64;
        let pair_label = pair.to_string();

        Plot::new("candle_plot")
            .view_aspect(PLOT_CONFIG.candle_aspect_ratio)
            .legend(Legend::default().position(Corner::LeftTop))
            .custom_x_axes(vec![time_axis()])
            .custom_y_axes(vec![price_axis(&pair_label)])
            .label_formatter(|_name, value| {
                format!(
                    "{}\n{}",
                    epoch_ms_to_short_utc(value.x as i64),
                    format_price(value.y)
                )
            })
            .allow_scroll(false)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_boxed_zoom(false)
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds_x(cache.x_min..=cache.x_max);
                plot_ui.set_plot_bounds_y(cache.y_min..=cache.y_max);

                let ctx = LayerContext {
                    candles,
                    overlays,
                    interval_ms,
                    x_min: cache.x_min,
                    x_max: cache.x_max,
                    y_min: cache.y_min,
                    y_max: cache.y_max,
                };

                // Back to front
                let layers: Vec<Box<dyn PlotLayer>> = vec![
                    Box::new(WatermarkLayer),
                    Box::new(CandleLayer),
                    Box::new(OrderBookLinesLayer),
                ];

                for layer in layers {
                    layer.render(plot_ui, &ctx);
                }
            });
    }

    /// Bids plot upward and asks downward; every label shows a magnitude.
    pub fn show_depth_plot(&self, ui: &mut egui::Ui, book: &OrderBookSnapshot) {
        let width = depth_bar_width(book);
        let (bids, asks): (Vec<_>, Vec<_>) = mirrored_depth(book)
            .into_iter()
            .partition(|(side, _)| *side == BookSide::Bid);

        let to_bars = |levels: Vec<(BookSide, [f64; 2])>, color: Color32| -> Vec<Bar> {
            levels
                .into_iter()
                .map(|(_, [price, signed_size])| {
                    Bar::new(price, signed_size).width(width).fill(color)
                })
                .collect()
        };

        let bar_label = |bar: &Bar, _chart: &BarChart| {
            format!(
                "{}\nVolume {}",
                format_price(bar.argument),
                format_volume(bar.value)
            )
        };

        let bid_chart = BarChart::new(UI_TEXT.legend_bids, to_bars(bids, PLOT_CONFIG.bid_line_color))
            .element_formatter(Box::new(bar_label));
        let ask_chart = BarChart::new(UI_TEXT.legend_asks, to_bars(asks, PLOT_CONFIG.ask_line_color))
            .element_formatter(Box::new(bar_label));

        Plot::new("depth_plot")
            .view_aspect(PLOT_CONFIG.depth_aspect_ratio)
            .legend(Legend::default().position(Corner::RightTop))
            .custom_x_axes(vec![
                AxisHints::new_x()
                    .label(UI_TEXT.plot_price_axis)
                    .formatter(|mark, _range| format_price(mark.value)),
            ])
            .custom_y_axes(vec![
                AxisHints::new_y()
                    .label(UI_TEXT.plot_volume_axis)
                    .formatter(|mark, _range| format_volume(mark.value))
                    .placement(HPlacement::Left),
            ])
            .label_formatter(|_name, value| {
                format!("{}\n{}", format_price(value.x), format_volume(value.y))
            })
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(bid_chart);
                plot_ui.bar_chart(ask_chart);
            });
    }

    pub fn show_open_interest_plot(
        &self,
        ui: &mut egui::Ui,
        pair: &TradingPair,
        series: &[OpenInterestPoint],
    ) {
        let points: PlotPoints = series
            .iter()
            .map(|p| [p.timestamp_ms as f64, p.value])
            .collect();
        let name = format!("{} {}", pair, UI_TEXT.plot_open_interest_axis);

        Plot::new("open_interest_plot")
            .view_aspect(PLOT_CONFIG.open_interest_aspect_ratio)
            .legend(Legend::default().position(Corner::LeftTop))
            .custom_x_axes(vec![time_axis()])
            .custom_y_axes(vec![
                AxisHints::new_y()
                    .label(UI_TEXT.plot_open_interest_axis)
                    .formatter(|mark, _range| format!("{:.0}", mark.value))
                    .placement(HPlacement::Left),
            ])
            .label_formatter(|_name, value| {
                format!(
                    "{}\n{:.0}",
                    epoch_ms_to_short_utc(value.x as i64),
                    value.y
                )
            })
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(name, points)
                        .color(PLOT_CONFIG.open_interest_color)
                        .width(PLOT_CONFIG.open_interest_line_width),
                );
            });
    }

    fn candle_bounds(
        &mut self,
        pair: &TradingPair,
        interval: Interval,
        candles: &[Candle],
        overlays: &[OverlayLine],
    ) -> Option<PlotCache> {
        let (first, last) = (candles.first()?, candles.last()?);

        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        pair.hash(&mut hasher);
        interval.hash(&mut hasher);
        candles.len().hash(&mut hasher);
        first.open_time_ms.hash(&mut hasher);
        last.open_time_ms.hash(&mut hasher);
        last.close_price.to_bits().hash(&mut hasher);
        for overlay in overlays {
            overlay.price.to_bits().hash(&mut hasher);
        }
        let key = hasher.finish();

        if let Some(cache) = &self.cache {
            if cache.key == key {
                return Some(cache.clone());
            }
        }

        let interval_ms = interval.to_ms() as f64;
        let lows = candles.iter().map(|c| c.low_price);
        let highs = candles.iter().map(|c| c.high_price);
        let levels = overlays.iter().map(|o| o.price);
        let y_min = lows.chain(levels.clone()).fold(f64::INFINITY, f64::min);
        let y_max = highs.chain(levels).fold(f64::NEG_INFINITY, f64::max);
        let pad = ((y_max - y_min) * 0.05).max(y_max.abs() * 1e-4);

        let cache = PlotCache {
            key,
            x_min: first.open_time_ms as f64,
            x_max: last.open_time_ms as f64 + interval_ms,
            y_min: y_min - pad,
            y_max: y_max + pad,
        };
        self.cache = Some(cache.clone());
        Some(cache)
    }
}

fn time_axis() -> AxisHints<'static> {
    AxisHints::new_x()
        .label(UI_TEXT.plot_time_axis)
        .formatter(|grid_mark, _range| epoch_ms_to_short_utc(grid_mark.value as i64))
}

fn price_axis(pair_label: &str) -> AxisHints<'static> {
    let label = format!("{}  {}", pair_label, UI_TEXT.plot_price_axis);
    AxisHints::new_y()
        .label(label)
        .formatter(|grid_mark, _range| format_price(grid_mark.value))
        .placement(HPlacement::Left)
}

/// Bars as wide as the tightest price step in the book, so neighbours never overlap.
fn depth_bar_width(book: &OrderBookSnapshot) -> f64 {
    let smallest_gap = |prices: Vec<f64>| {
        prices
            .windows(2)
            .map(|w| (w[1] - w[0]).abs())
            .filter(|gap| *gap > 0.0)
            .fold(f64::INFINITY, f64::min)
    };
    let gap = smallest_gap(book.bids.iter().map(|l| l.price).collect())
        .min(smallest_gap(book.asks.iter().map(|l| l.price).collect()));

    if gap.is_finite() {
        gap * 0.9
    } else {
        book.bids
            .first()
            .or(book.asks.first())
            .map(|l| l.price.abs() * 1e-4)
            .unwrap_or(1.0)
    }
}
