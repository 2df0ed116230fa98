use eframe::egui::{Context, RichText, Ui, Visuals};

use crate::domain::OrderBookLevel;
use crate::ui::config::UI_CONFIG;

/// Uppercase monospace heading in the configured heading color.
pub fn colored_heading(text: impl Into<String>) -> RichText {
    let uppercase_text = text.into().to_uppercase();
    RichText::new(uppercase_text)
        .color(UI_CONFIG.colors.heading)
        .monospace()
}

/// Sets up custom visuals for the entire application
pub fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();

    visuals.window_fill = UI_CONFIG.colors.central_panel;
    visuals.panel_fill = UI_CONFIG.colors.side_panel;

    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;

    ctx.set_visuals(visuals);
}

/// Creates a section heading with standard spacing
pub fn section_heading(ui: &mut Ui, text: impl Into<String>) {
    ui.add_space(10.0);
    ui.heading(colored_heading(text));
    ui.add_space(5.0);
}

/// Creates a separator with standard spacing
pub fn spaced_separator(ui: &mut Ui) {
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(10.0);
}

/// Price with precision scaled to its magnitude.
/// - 1000 and up: 2 decimals
/// - 1 to 1000: 4 decimals
/// - pennies: 5 decimals
/// - below a cent: 8 decimals
pub fn format_price(price: f64) -> String {
    if price == 0.0 {
        return "$0.00".to_string();
    }

    match price.abs() {
        p if p >= 1000.0 => format!("${:.2}", price),
        p if p >= 1.0 => format!("${:.4}", price),
        p if p >= 0.01 => format!("${:.5}", price),
        _ => format!("${:.8}", price),
    }
}

/// Compact volume for axis ticks: 1.2K, 3.4M. Always a magnitude.
pub fn format_volume(volume: f64) -> String {
    let v = volume.abs();
    if v >= 1_000_000.0 {
        format!("{:.1}M", v / 1_000_000.0)
    } else if v >= 1_000.0 {
        format!("{:.1}K", v / 1_000.0)
    } else {
        format!("{:.2}", v)
    }
}

/// One ranked order-book row. Sizes show as magnitudes.
pub fn level_row_text(position: usize, level: &OrderBookLevel) -> String {
    format!(
        "Position {}: Price {}, Volume {:.2}",
        position,
        format_price(level.price),
        level.size.abs()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_precision_follows_magnitude() {
        assert_eq!(format_price(95_123.5), "$95123.50");
        assert_eq!(format_price(12.48291), "$12.4829");
        assert_eq!(format_price(0.05), "$0.05000");
        assert_eq!(format_price(0.00000231), "$0.00000231");
        assert_eq!(format_price(0.0), "$0.00");
    }

    #[test]
    fn volume_ticks_drop_the_sign() {
        assert_eq!(format_volume(-2_500.0), "2.5K");
        assert_eq!(format_volume(3_400_000.0), "3.4M");
        assert_eq!(format_volume(-0.5), "0.50");
    }

    #[test]
    fn level_rows_round_sizes() {
        let level = OrderBookLevel::new(64_123.1, -(0.1 + 0.2));
        assert_eq!(
            level_row_text(1, &level),
            "Position 1: Price $64123.10, Volume 0.30"
        );
    }
}
