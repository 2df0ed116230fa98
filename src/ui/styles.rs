use eframe::egui::{Color32, RichText, Ui};

use crate::analysis::Regime;
use crate::domain::OrderBookLevel;
use crate::ui::config::UI_CONFIG;
use crate::ui::utils::level_row_text;

/// Extension trait to add semantic styling methods directly to `egui::Ui`.
pub trait UiStyleExt {
    /// Renders small, gray text (good for labels like "OI source:").
    fn label_subdued(&mut self, text: impl Into<String>);

    /// Renders a "Label: Value" pair; the label is subdued, the value colored.
    fn metric(&mut self, label: &str, value: &str, color: Color32);

    fn label_subheader(&mut self, text: impl Into<String>);

    fn label_error(&mut self, text: impl Into<String>);

    fn label_warning(&mut self, text: impl Into<String>);

    /// Large headline in the regime's color.
    fn label_verdict(&mut self, regime: Regime, headline: &str);

    /// "Position i: Price p, Volume v" rows. Volumes always print as magnitudes.
    fn level_rows(&mut self, levels: &[OrderBookLevel], color: Color32, empty_text: &str);
}

impl UiStyleExt for Ui {
    fn label_subdued(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(Color32::GRAY));
    }

    fn metric(&mut self, label: &str, value: &str, color: Color32) {
        self.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0;
            ui.label_subdued(format!("{}:", label));
            ui.label(RichText::new(value).small().color(color));
        });
    }

    fn label_subheader(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).color(UI_CONFIG.colors.subsection_heading));
    }

    fn label_error(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).color(UI_CONFIG.colors.error));
    }

    fn label_warning(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(UI_CONFIG.colors.warning));
    }

    fn label_verdict(&mut self, regime: Regime, headline: &str) {
        self.label(
            RichText::new(headline)
                .heading()
                .strong()
                .color(regime_color(regime)),
        );
    }

    fn level_rows(&mut self, levels: &[OrderBookLevel], color: Color32, empty_text: &str) {
        if levels.is_empty() {
            self.label_subdued(empty_text);
        }
        for (i, level) in levels.iter().enumerate() {
            self.label(
                RichText::new(level_row_text(i + 1, level))
                .monospace()
                .color(color),
            );
        }
    }
}

pub fn regime_color(regime: Regime) -> Color32 {
    match regime {
        Regime::Bullish => UI_CONFIG.colors.bullish,
        Regime::Bearish => UI_CONFIG.colors.bearish,
        Regime::Neutral => UI_CONFIG.colors.neutral,
    }
}
