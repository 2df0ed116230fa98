use eframe::{Frame, egui};
use poll_promise::Promise;

use crate::domain::{AskRanking, Interval};
use crate::report::{MarketReport, ReportError};
use crate::ui::app_async::FetchResult;
use crate::ui::ui_plot_view::PlotView;
use crate::ui::utils::setup_custom_visuals;
use crate::{Cli, ScanServices};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Outcome of the most recent finished run, kept until the next one lands.
pub struct CompletedRun {
    pub outcome: Result<MarketReport, ReportError>,
    pub elapsed_secs: f32,
}

pub struct ScannerApp {
    pub(super) pair_input: String,
    pub(super) interval: Interval,
    pub(super) candle_limit: usize,
    pub(super) ask_ranking: AskRanking,
    pub(super) services: ScanServices,
    pub(super) fetch_promise: Option<Promise<FetchResult>>,
    pub(super) last_run: Option<CompletedRun>,
    pub(super) plot_view: PlotView,
}

impl ScannerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, services: ScanServices, cli: &Cli) -> Self {
        Self::with_services(services, cli)
    }

    pub(crate) fn with_services(services: ScanServices, cli: &Cli) -> Self {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions {
            log::info!(
                "Scanner ready: {} {} (client: {}, OI: {})",
                cli.pair,
                cli.interval,
                services.client.signature(),
                services.open_interest.signature()
            );
        }

        Self {
            pair_input: cli.pair.clone(),
            interval: cli.interval,
            candle_limit: cli.limit,
            ask_ranking: cli.ask_ranking(),
            services,
            fetch_promise: None,
            last_run: None,
            plot_view: PlotView::new(),
        }
    }

    pub fn last_report(&self) -> Option<&MarketReport> {
        self.last_run
            .as_ref()
            .and_then(|run| run.outcome.as_ref().ok())
    }
}

impl eframe::App for ScannerApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // The worker finishes on its own; we just stop listening
        self.fetch_promise = None;
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        setup_custom_visuals(ctx);

        self.poll_fetch(ctx);

        self.render_side_panel(ctx);
        self.render_status_panel(ctx);
        self.render_central_panel(ctx);
    }
}
