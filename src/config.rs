use std::path::PathBuf;

use clap::Parser;

use crate::data::bins::BinEdges;
use crate::data::loader::{SourceFormat, TextEncoding};

/// Rusty Tickers – trending-tickers dashboard
#[derive(Parser, Debug)]
#[command(name = "rusty-tickers")]
#[command(version)]
#[command(about = "Company financials dashboard: ingest, persist, select, and chart", long_about = None)]
pub struct Cli {
    /// Delimited company file (columns empresas, valor, change, change2)
    #[arg(short, long, env = "TICKERS_INPUT", default_value = "data/basestratadas.csv")]
    pub input: PathBuf,

    /// SQLite database mirroring the dataset
    #[arg(long, env = "TICKERS_DB", default_value = "dados_empresas.db")]
    pub db: PathBuf,

    /// Field delimiter of the input file
    #[arg(short, long, default_value_t = ';')]
    pub delimiter: char,

    /// Text encoding of the input file
    #[arg(short, long, value_enum, default_value_t = TextEncoding::Utf8)]
    pub encoding: TextEncoding,

    /// Six ascending percent-change edges for the five ranges, comma separated
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub edges: Option<Vec<f64>>,

    /// Company selected at start-up (defaults to the first one)
    #[arg(short, long)]
    pub company: Option<String>,

    /// Run once without a window and write the dashboard as JSON (`-` for stdout)
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Everything one pipeline run needs, independent of how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub input: PathBuf,
    pub db: PathBuf,
    pub format: SourceFormat,
    pub edges: BinEdges,
}

impl Config {
    pub fn new(input: impl Into<PathBuf>, db: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            db: db.into(),
            format: SourceFormat::default(),
            edges: BinEdges::default(),
        }
    }
}

impl TryFrom<&Cli> for Config {
    type Error = anyhow::Error;

    fn try_from(cli: &Cli) -> anyhow::Result<Self> {
        let delimiter = u8::try_from(cli.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                anyhow::anyhow!("delimiter must be a single ASCII character, got {:?}", cli.delimiter)
            })?;
        let edges = match &cli.edges {
            Some(values) => parse_edges(values)?,
            None => BinEdges::default(),
        };
        Ok(Self {
            format: SourceFormat {
                delimiter,
                encoding: cli.encoding,
            },
            edges,
            ..Self::new(&cli.input, &cli.db)
        })
    }
}

fn parse_edges(values: &[f64]) -> anyhow::Result<BinEdges> {
    let edges: [f64; 6] = values
        .try_into()
        .map_err(|_| anyhow::anyhow!("--edges takes exactly 6 values, got {}", values.len()))?;
    BinEdges::new(edges)
        .ok_or_else(|| anyhow::anyhow!("--edges must be finite and strictly increasing, got {values:?}"))
}
