mod app;
mod chart;
mod color;
mod config;
mod data;
mod error;
mod pipeline;
mod state;
mod ui;

use std::path::Path;

use anyhow::{Context, Result};
use app::RustyTickersApp;
use clap::Parser;
use config::{Cli, Config};
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::try_from(&cli)?;

    if let Some(out) = &cli.export {
        return export(&config, cli.company.as_deref(), out);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let state = AppState::new(config, cli.company);
    eframe::run_native(
        "Rusty Tickers – Trending Tickers",
        options,
        Box::new(move |_cc| Ok(Box::new(RustyTickersApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

/// Headless mode: one pipeline run, dashboard written as JSON.
fn export(config: &Config, company: Option<&str>, out: &Path) -> Result<()> {
    let dashboard = pipeline::run(config, company).context("running pipeline")?;
    let json = serde_json::to_string_pretty(&dashboard).context("serializing dashboard")?;

    if out == Path::new("-") {
        println!("{json}");
    } else {
        std::fs::write(out, json).with_context(|| format!("writing {}", out.display()))?;
        log::info!("Wrote dashboard for {} rows to {}", dashboard.rows, out.display());
    }
    Ok(())
}
