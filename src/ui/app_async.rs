use eframe::egui;
use poll_promise::Promise;
use std::time::{Duration, Instant};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::report::{MarketReport, ReportError, ReportRequest};
use crate::ui::app::{CompletedRun, ScannerApp};
use crate::ui::config::UI_CONFIG;

pub(crate) struct FetchResult {
    outcome: Result<MarketReport, ReportError>,
    elapsed: Duration,
}

impl ScannerApp {
    /// Starts a run for the current inputs. Ignored while another run is in flight.
    pub(super) fn start_fetch(&mut self) {
        if self.is_fetching() {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_ui_interactions {
                log::info!("Fetch already running, click ignored");
            }
            return;
        }

        let request = match ReportRequest::new(&self.pair_input, self.interval) {
            Ok(request) => request
                .with_candle_limit(self.candle_limit)
                .with_ask_ranking(self.ask_ranking),
            Err(e) => {
                self.last_run = Some(CompletedRun {
                    outcome: Err(e),
                    elapsed_secs: 0.0,
                });
                return;
            }
        };

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions {
            log::info!("Fetching {} {}", request.pair, request.interval);
        }

        let services = self.services.clone();
        let promise = Promise::spawn_thread("market_report", move || {
            let started = Instant::now();
            let outcome = services.run(&request);
            FetchResult {
                outcome,
                elapsed: started.elapsed(),
            }
        });

        self.fetch_promise = Some(promise);
    }

    pub(super) fn poll_fetch(&mut self, ctx: &egui::Context) {
        let Some(promise) = self.fetch_promise.take() else {
            return;
        };

        match promise.try_take() {
            Ok(result) => {
                if let Err(e) = &result.outcome {
                    log::error!("❌ Report failed: {}", e);
                }
                self.plot_view.clear_cache();
                self.last_run = Some(CompletedRun {
                    outcome: result.outcome,
                    elapsed_secs: result.elapsed.as_secs_f32(),
                });
                ctx.request_repaint();
            }
            Err(pending) => {
                self.fetch_promise = Some(pending);
                ctx.request_repaint_after(Duration::from_millis(UI_CONFIG.busy_repaint_ms));
            }
        }
    }

    pub(super) fn is_fetching(&self) -> bool {
        self.fetch_promise.is_some()
    }
}
