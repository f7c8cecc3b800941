use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Write a demo trending-tickers file in the dashboard's input layout.
#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
struct Args {
    /// Output path
    #[arg(default_value = "data/basestratadas.csv")]
    output: PathBuf,

    /// Number of companies
    #[arg(short, long, default_value_t = 25)]
    rows: usize,

    /// Generator seed
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
}

const TICKERS: [&str; 30] = [
    "NVDA", "AAPL", "MSFT", "AMZN", "GOOGL", "META", "TSLA", "AMD", "INTC", "NFLX", "PLTR",
    "SMCI", "ARM", "AVGO", "ORCL", "CRM", "ADBE", "QCOM", "MU", "SHOP", "UBER", "ABNB", "COIN",
    "SNOW", "PYPL", "DIS", "BA", "F", "GM", "NIO",
];

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut rng = StdRng::seed_from_u64(args.seed);
    // Percent moves of trending tickers: mostly positive, a long right tail.
    let pct = Normal::new(8.0, 7.0).context("percent-change distribution")?;

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    writer.write_record(["empresas", "valor", "change", "change2"])?;

    for i in 0..args.rows {
        let ticker = match TICKERS.get(i) {
            Some(t) => t.to_string(),
            None => format!("TICK{i}"),
        };
        let value: f64 = rng.gen_range(2.0..600.0);
        let change_pct: f64 = pct.sample(&mut rng);
        let previous = value / (1.0 + change_pct / 100.0);
        let change_abs = value - previous;

        writer.write_record([
            ticker,
            format!("{value:.2}"),
            format!("{change_abs:.2}"),
            format!("{change_pct:.2}"),
        ])?;
    }
    writer.flush()?;

    log::info!("Wrote {} companies to {}", args.rows, args.output.display());
    println!("Wrote {} companies to {}", args.rows, args.output.display());
    Ok(())
}
