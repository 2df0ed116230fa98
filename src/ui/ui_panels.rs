use eframe::egui::{Button, ComboBox, Key, TextEdit, Ui};
use strum::IntoEnumIterator;

use crate::domain::Interval;
use crate::ui::config::UI_TEXT;
use crate::ui::styles::UiStyleExt;
use crate::ui::utils::{section_heading, spaced_separator};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Trait for UI panels that can be rendered
pub trait Panel {
    type Event;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEvent {
    IntervalChanged(Interval),
    FetchRequested,
}

/// Pair input, interval picker and the fetch button.
pub struct ScanPanel<'a> {
    pair_input: &'a mut String,
    interval: Interval,
    busy: bool,
}

impl<'a> ScanPanel<'a> {
    pub fn new(pair_input: &'a mut String, interval: Interval, busy: bool) -> Self {
        Self {
            pair_input,
            interval,
            busy,
        }
    }

    fn render_pair_input(&mut self, ui: &mut Ui) -> bool {
        ui.label_subheader(UI_TEXT.pair_label);
        let response = ui.add(
            TextEdit::singleline(self.pair_input)
                .hint_text(UI_TEXT.pair_hint)
                .desired_width(f32::INFINITY),
        );
        // Enter in the field acts like the button
        response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter))
    }

    fn render_interval_selector(&mut self, ui: &mut Ui) -> Option<Interval> {
        let mut changed = None;
        ui.label_subheader(UI_TEXT.interval_label);
        ComboBox::from_id_salt("interval_selector")
            .selected_text(self.interval.to_string())
            .show_ui(ui, |ui| {
                for interval in Interval::iter() {
                    if ui
                        .selectable_value(&mut self.interval, interval, interval.to_string())
                        .clicked()
                    {
                        changed = Some(interval);
                    }
                }
            });

        #[cfg(debug_assertions)]
        if let Some(interval) = changed {
            if DEBUG_FLAGS.print_ui_interactions {
                log::info!("Interval changed to {}", interval);
            }
        }

        changed
    }
}

impl<'a> Panel for ScanPanel<'a> {
    type Event = ScanEvent;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        section_heading(ui, UI_TEXT.controls_heading);

        let submitted = self.render_pair_input(ui);
        ui.add_space(8.0);

        if let Some(interval) = self.render_interval_selector(ui) {
            events.push(ScanEvent::IntervalChanged(interval));
        }
        spaced_separator(ui);

        let clicked = ui
            .add_enabled(!self.busy, Button::new(UI_TEXT.fetch_button))
            .clicked();
        if (clicked || submitted) && !self.busy {
            events.push(ScanEvent::FetchRequested);
        }

        if self.busy {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label_subdued(UI_TEXT.fetching);
            });
        }

        events
    }
}
