#![allow(clippy::collapsible_if)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod report;
pub mod ui;
pub mod utils;

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::runtime::Handle;

// Re-export commonly used types
pub use analysis::{DirectionVerdict, Regime, classify};
pub use config::REPORT;
pub use data::{BinanceMarketData, MarketDataClient, OpenInterestSource, SyntheticOpenInterest};
pub use domain::{AskRanking, Candle, Interval, TradingPair};
pub use report::{MarketReport, ReportError, ReportRequest, TextSink, build_report};
pub use ui::ScannerApp;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run one report, print it and exit instead of opening a window
    #[arg(long, default_value_t = false)]
    pub headless: bool,

    /// Trading pair, e.g. BTC/USDT or ETHUSDT
    #[arg(long, default_value_t = REPORT.default_pair.to_string())]
    pub pair: String,

    /// Candle interval: 1m, 5m, 15m, 1h, 4h, 1d or 1w
    #[arg(long, default_value_t = Interval::default())]
    pub interval: Interval,

    /// Number of candles to fetch
    #[arg(long, default_value_t = REPORT.candle_limit)]
    pub limit: usize,

    /// Print the headless report as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Rank asks by largest size instead of smallest
    #[arg(long, default_value_t = false)]
    pub largest_asks: bool,

    /// Seed for the synthetic open interest generator
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Cli {
    pub fn ask_ranking(&self) -> AskRanking {
        if self.largest_asks {
            AskRanking::LargestSize
        } else {
            AskRanking::SmallestSize
        }
    }

    pub fn open_interest_source(&self) -> SyntheticOpenInterest {
        self.seed
            .map(SyntheticOpenInterest::seeded)
            .unwrap_or_default()
    }

    pub fn request(&self) -> Result<ReportRequest, ReportError> {
        Ok(ReportRequest::new(&self.pair, self.interval)?
            .with_candle_limit(self.limit)
            .with_ask_ranking(self.ask_ranking()))
    }
}

/// Long-lived handles shared by every run: one runtime, one exchange client, one OI feed.
#[derive(Clone)]
pub struct ScanServices {
    pub runtime: Handle,
    pub client: Arc<dyn MarketDataClient>,
    pub open_interest: Arc<dyn OpenInterestSource>,
}

impl ScanServices {
    /// Blocks the calling thread until the run completes. Never call from inside the runtime.
    pub fn run(&self, request: &ReportRequest) -> Result<MarketReport, ReportError> {
        self.runtime.block_on(build_report(
            self.client.as_ref(),
            self.open_interest.as_ref(),
            request,
        ))
    }
}

/// Main application entry point - creates the GUI app
pub fn run_app(
    cc: &eframe::CreationContext,
    services: ScanServices,
    cli: &Cli,
) -> Box<dyn eframe::App> {
    Box::new(ui::ScannerApp::new(cc, services, cli))
}

/// One report written to `out`. Returns whether the run produced a report.
pub fn run_headless(cli: &Cli, services: &ScanServices, out: &mut impl Write) -> anyhow::Result<bool> {
    let outcome = cli.request().and_then(|request| services.run(&request));

    if cli.json {
        match &outcome {
            Ok(report) => serde_json::to_writer_pretty(&mut *out, report)
                .context("serializing report")?,
            Err(e) => serde_json::to_writer_pretty(
                &mut *out,
                &serde_json::json!({ "error": e.to_string() }),
            )
            .context("serializing error")?,
        }
        writeln!(out)?;
    } else {
        let mut sink = TextSink::new();
        report::present_outcome(&outcome, &mut sink);
        sink.write_to(out).context("writing report")?;
    }

    Ok(outcome.is_ok())
}
