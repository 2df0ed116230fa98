use eframe::egui::Color32;

pub use crate::ui::ui_text::{UI_TEXT, UiText};

/// UI Colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub subsection_heading: Color32,
    pub central_panel: Color32,
    pub side_panel: Color32,
    pub bullish: Color32,
    pub bearish: Color32,
    pub neutral: Color32,
    pub warning: Color32,
    pub error: Color32,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    pub side_panel_min_width: f32,
    /// Repaint cadence while a fetch is in flight
    pub busy_repaint_ms: u64,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::GRAY,
        heading: Color32::YELLOW,
        subsection_heading: Color32::ORANGE,
        central_panel: Color32::from_rgb(20, 22, 28),
        side_panel: Color32::from_rgb(25, 25, 25),
        bullish: Color32::from_rgb(14, 203, 129),
        bearish: Color32::from_rgb(246, 70, 93),
        neutral: Color32::GRAY,
        warning: Color32::from_rgb(255, 215, 0),
        error: Color32::from_rgb(255, 100, 100),
    },
    side_panel_min_width: 180.0,
    busy_repaint_ms: 100,
};
