use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, anyhow};
use clap::Parser;
use eframe::NativeOptions;
use tokio::runtime::Runtime;

use oi_scanner::ui::UI_TEXT;
use oi_scanner::{BinanceMarketData, Cli, ScanServices, run_app, run_headless};

fn main() -> anyhow::Result<ExitCode> {
    // A. Init Logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    // C. Shared services: one runtime and one exchange client for the whole session
    let runtime = Runtime::new().context("creating Tokio runtime")?;
    let client = BinanceMarketData::new()?;
    let services = ScanServices {
        runtime: runtime.handle().clone(),
        client: Arc::new(client),
        open_interest: Arc::new(args.open_interest_source()),
    };

    // D. Headless: one report to stdout
    if args.headless {
        let mut stdout = std::io::stdout().lock();
        let ok = run_headless(&args, &services, &mut stdout)?;
        return Ok(if ok {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    // E. Run Native App
    log::info!("🚀 OI Scanner starting");
    eframe::run_native(
        UI_TEXT.window_title,
        NativeOptions::default(),
        Box::new(move |cc| Ok(run_app(cc, services, &args))),
    )
    .map_err(|e| anyhow!("eframe failed: {}", e))?;

    Ok(ExitCode::SUCCESS)
}
