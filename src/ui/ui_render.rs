use eframe::egui::{CentralPanel, Context, Frame, Margin, RichText, ScrollArea, SidePanel, TopBottomPanel, Ui};

use crate::analysis::DirectionVerdict;
use crate::domain::{Candle, Interval, OpenInterestPoint, OrderBookLevel, OrderBookSnapshot, TradingPair};
use crate::report::{OverlayLine, ReportError, ReportSink, ReportWarning, present_outcome};
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::{UiStyleExt, regime_color};
use crate::ui::ui_panels::{Panel, ScanEvent, ScanPanel};
use crate::ui::ui_plot_view::PlotView;
use crate::ui::utils::{section_heading, spaced_separator};
use crate::utils::time_utils::epoch_ms_to_utc;

use super::app::ScannerApp;

impl ScannerApp {
    pub(super) fn render_side_panel(&mut self, ctx: &Context) {
        let side_panel_frame = Frame::new()
            .fill(UI_CONFIG.colors.side_panel)
            .inner_margin(Margin::same(8));
        SidePanel::left("left_panel")
            .min_width(UI_CONFIG.side_panel_min_width)
            .frame(side_panel_frame)
            .show(ctx, |ui| {
                let busy = self.is_fetching();
                let events = ScanPanel::new(&mut self.pair_input, self.interval, busy).render(ui);

                for event in events {
                    match event {
                        ScanEvent::IntervalChanged(interval) => self.interval = interval,
                        ScanEvent::FetchRequested => self.start_fetch(),
                    }
                }
            });
    }

    pub(super) fn render_status_panel(&mut self, ctx: &Context) {
        let status_frame = Frame::new()
            .fill(UI_CONFIG.colors.side_panel)
            .inner_margin(Margin::symmetric(8, 4));
        TopBottomPanel::bottom("status_panel")
            .frame(status_frame)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.metric("📡", self.services.client.signature(), UI_CONFIG.colors.label);
                    ui.separator();
                    ui.metric(
                        UI_TEXT.source_label,
                        self.services.open_interest.signature(),
                        UI_CONFIG.colors.warning,
                    );

                    if let Some(run) = &self.last_run {
                        ui.separator();
                        if let Ok(report) = &run.outcome {
                            ui.metric(
                                UI_TEXT.generated_label,
                                &format!("{} UTC", epoch_ms_to_utc(report.generated_at_ms)),
                                UI_CONFIG.colors.label,
                            );
                            ui.separator();
                        }
                        ui.label_subdued(format!("{:.2}s", run.elapsed_secs));
                    }
                });
            });
    }

    pub(super) fn render_central_panel(&mut self, ctx: &Context) {
        let central_panel_frame = Frame::new()
            .fill(UI_CONFIG.colors.central_panel)
            .inner_margin(Margin::same(12));
        CentralPanel::default()
            .frame(central_panel_frame)
            .show(ctx, |ui| {
                ScrollArea::vertical()
                    .id_salt("report_scroll")
                    .show(ui, |ui| match &self.last_run {
                        Some(run) => {
                            let mut panel = ReportPanel::new(ui, &mut self.plot_view);
                            present_outcome(&run.outcome, &mut panel);
                        }
                        None if self.fetch_promise.is_some() => {
                            ui.label_subdued(UI_TEXT.fetching);
                        }
                        None => {
                            ui.label_subdued(UI_TEXT.idle_prompt);
                        }
                    });
            });
    }
}

/// Draws a report into the central panel. Rebuilt every frame.
pub struct ReportPanel<'a> {
    ui: &'a mut Ui,
    plot_view: &'a mut PlotView,
    synthetic_open_interest: bool,
}

impl<'a> ReportPanel<'a> {
    pub fn new(ui: &'a mut Ui, plot_view: &'a mut PlotView) -> Self {
        Self {
            ui,
            plot_view,
            synthetic_open_interest: false,
        }
    }
}

impl ReportSink for ReportPanel<'_> {
    fn render_warning(&mut self, warning: &ReportWarning) {
        if matches!(warning, ReportWarning::SyntheticOpenInterest) {
            // Shown next to the OI chart instead
            self.synthetic_open_interest = true;
            return;
        }
        self.ui.label_warning(format!("⚠ {}", warning));
    }

    fn render_candles(
        &mut self,
        pair: &TradingPair,
        interval: Interval,
        candles: &[Candle],
        overlays: &[OverlayLine],
    ) {
        section_heading(
            self.ui,
            format!("{} {} {}", pair, interval, UI_TEXT.candles_heading),
        );
        self.plot_view
            .show_candle_plot(self.ui, pair, interval, candles, overlays);
    }

    fn render_levels(&mut self, bids: &[OrderBookLevel], asks: &[OrderBookLevel]) {
        spaced_separator(self.ui);
        self.ui.columns(2, |columns| {
            columns[0].label_subheader(UI_TEXT.bids_heading);
            columns[0].level_rows(bids, UI_CONFIG.colors.bullish, UI_TEXT.no_levels);
            columns[1].label_subheader(UI_TEXT.asks_heading);
            columns[1].level_rows(asks, UI_CONFIG.colors.bearish, UI_TEXT.no_levels);
        });
    }

    fn render_depth(&mut self, book: &OrderBookSnapshot) {
        if book.is_empty() {
            return;
        }
        section_heading(self.ui, UI_TEXT.depth_heading);
        self.plot_view.show_depth_plot(self.ui, book);
    }

    fn render_open_interest(
        &mut self,
        pair: &TradingPair,
        series: &[OpenInterestPoint],
        _source: &str,
    ) {
        section_heading(self.ui, UI_TEXT.open_interest_heading);
        if self.synthetic_open_interest {
            self.ui.label_warning(UI_TEXT.synthetic_tag);
        }
        self.plot_view
            .show_open_interest_plot(self.ui, pair, series);
    }

    fn render_verdict(&mut self, verdict: &DirectionVerdict) {
        spaced_separator(self.ui);
        self.ui.label(
            RichText::new(UI_TEXT.verdict_heading.to_uppercase())
                .monospace()
                .color(regime_color(verdict.regime)),
        );
        self.ui.label_verdict(verdict.regime, &verdict.headline);
        self.ui.label(verdict.rationale.as_str());
    }

    fn render_error(&mut self, error: &ReportError) {
        self.ui.label_error(format!("❌ {}", error));
    }
}
