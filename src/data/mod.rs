/// Data layer: core types, ingest, persistence, selection, and binning.
///
/// Architecture:
/// ```text
///   basestratadas.csv  (';'-separated)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  store    │  full-replace save → reload (SQLite table `empresas`)
///   └──────────┘
///        │
///        ├──────────────────────┐
///        ▼                      ▼
///   ┌──────────┐          ┌──────────┐
///   │  filter   │          │  bins     │  change_pct → faixa label
///   └──────────┘          └──────────┘
///   selected company            │
///   → Metrics                   ▼
///                          chart specs
/// ```

pub mod bins;
pub mod filter;
pub mod loader;
pub mod model;
pub mod store;
