//! Plot visualization configuration

use eframe::egui::Color32;

pub struct PlotConfig {
    pub bullish_candle_color: Color32,
    pub bearish_candle_color: Color32,
    /// Fraction of the interval width a candle body occupies
    pub candle_body_width_pct: f64,
    pub bid_line_color: Color32,
    pub ask_line_color: Color32,
    pub level_line_width: f32,
    pub open_interest_color: Color32,
    pub open_interest_line_width: f32,
    pub watermark_text: &'static str,
    pub watermark_color: Color32,
    /// Candle chart aspect ratio (width:height)
    pub candle_aspect_ratio: f32,
    /// Open interest chart aspect ratio (width:height)
    pub open_interest_aspect_ratio: f32,
    pub depth_aspect_ratio: f32,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    bullish_candle_color: Color32::from_rgb(14, 203, 129), // Green
    bearish_candle_color: Color32::from_rgb(246, 70, 93),  // Red
    candle_body_width_pct: 0.7,
    bid_line_color: Color32::from_rgb(0, 200, 0),
    ask_line_color: Color32::from_rgb(200, 0, 0),
    level_line_width: 1.0,
    open_interest_color: Color32::from_rgb(66, 135, 245), // Blue
    open_interest_line_width: 1.5,
    watermark_text: "OI SCANNER",
    watermark_color: Color32::from_rgba_premultiplied(60, 60, 60, 60),
    candle_aspect_ratio: 1.5,
    open_interest_aspect_ratio: 3.0,
    depth_aspect_ratio: 3.0,
};
