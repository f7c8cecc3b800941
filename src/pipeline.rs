use serde::Serialize;

use crate::chart::summary::reference_sample;
use crate::chart::{build_all, Charts};
use crate::config::Config;
use crate::data::bins::{classify, BinEdges, DEFAULT_LABELS};
use crate::data::filter::{filter_by_company, first_metrics};
use crate::data::loader::ingest;
use crate::data::model::{Dataset, Metrics};
use crate::data::store::Store;
use crate::error::{NoMatchError, PipelineError};

// ---------------------------------------------------------------------------
// Pipeline output
// ---------------------------------------------------------------------------

/// Outcome of looking up the selected company.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Selection {
    Found { company: String, metrics: Metrics },
    NoMatch { company: String },
}

impl Selection {
    fn from_result(company: &str, result: Result<Metrics, NoMatchError>) -> Self {
        match result {
            Ok(metrics) => Selection::Found {
                company: company.to_string(),
                metrics,
            },
            Err(e) => Selection::NoMatch { company: e.company },
        }
    }

    pub fn company(&self) -> &str {
        match self {
            Selection::Found { company, .. } | Selection::NoMatch { company } => company,
        }
    }

    pub fn metrics(&self) -> Result<Metrics, NoMatchError> {
        match self {
            Selection::Found { metrics, .. } => Ok(*metrics),
            Selection::NoMatch { company } => Err(NoMatchError {
                company: company.clone(),
            }),
        }
    }
}

/// Everything the shell displays after one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    /// Distinct companies for the selector, first appearance order.
    pub companies: Vec<String>,
    /// `None` only when there is no company to select.
    pub selection: Option<Selection>,
    pub rows: usize,
    pub unclassified: usize,
    pub charts: Charts,
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// One full pass: ingest → save → reload → select → classify → charts.
///
/// Nothing is cached between calls. When `selected` is `None` the first
/// company is selected.
pub fn run(config: &Config, selected: Option<&str>) -> Result<Dashboard, PipelineError> {
    let ingested = ingest(&config.input, &config.format)?;

    let dataset = {
        let mut store = Store::open(&config.db)?;
        store.save(&ingested)?;
        store.load_all()?
    };

    Ok(build_dashboard(dataset, &config.edges, selected))
}

/// The part of [`run`] after the data is loaded.
pub fn build_dashboard(dataset: Dataset, edges: &BinEdges, selected: Option<&str>) -> Dashboard {
    if dataset.is_empty() {
        log::warn!("Dataset is empty; charts will have nothing to draw");
    }
    let companies = dataset.companies();

    let selection = selected
        .or_else(|| companies.first().map(String::as_str))
        .map(|key| Selection::from_result(key, first_metrics(&filter_by_company(&dataset, key))));
    if let Some(Selection::NoMatch { company }) = &selection {
        log::warn!("Selected company '{company}' is not in the dataset");
    }

    let classified = classify(dataset, edges, &DEFAULT_LABELS);
    let unclassified = classified.rows.iter().filter(|r| r.bin_label.is_none()).count();
    let charts = build_all(&reference_sample(), &classified, &DEFAULT_LABELS);

    log::debug!(
        "Dashboard built: {} rows, {} companies, {unclassified} unclassified",
        classified.len(),
        companies.len()
    );

    Dashboard {
        companies,
        selection,
        rows: classified.len(),
        unclassified,
        charts,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::error::IngestError;

    const CSV: &str = "empresas;valor;change;change2\n\
                       ACME;10;1;5\n\
                       GLOBEX;20;-2;0.47\n\
                       INITECH;30;3;100\n";

    fn setup(csv: &str) -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("basestratadas.csv");
        std::fs::File::create(&input)
            .unwrap()
            .write_all(csv.as_bytes())
            .unwrap();
        let config = Config::new(input, dir.path().join("dados_empresas.db"));
        (dir, config)
    }

    #[test]
    fn full_run_selects_first_company_by_default() {
        let (_dir, config) = setup(CSV);
        let dash = run(&config, None).unwrap();
        assert_eq!(dash.companies, vec!["ACME", "GLOBEX", "INITECH"]);
        assert_eq!(
            dash.selection,
            Some(Selection::Found {
                company: "ACME".to_string(),
                metrics: Metrics {
                    value: 10.0,
                    change_abs: 1.0,
                    change_pct: 5.0
                }
            })
        );
    }

    #[test]
    fn unknown_selection_is_reported_not_zeroed() {
        let (_dir, config) = setup(CSV);
        let dash = run(&config, Some("NONEXISTENT")).unwrap();
        let selection = dash.selection.unwrap();
        assert_eq!(
            selection.metrics(),
            Err(NoMatchError {
                company: "NONEXISTENT".to_string()
            })
        );
        // charts do not depend on the selection
        assert_eq!(dash.charts.bars.observation_count(), 3);
    }

    #[test]
    fn unclassified_rows_reach_the_histogram() {
        let (_dir, config) = setup(CSV);
        let dash = run(&config, None).unwrap();
        assert_eq!(dash.unclassified, 1);
        assert_eq!(dash.charts.histogram.observation_count(), dash.rows);
        assert_eq!(dash.charts.scatter.observation_count(), dash.rows);
    }

    #[test]
    fn reruns_are_identical() {
        let (_dir, config) = setup(CSV);
        assert_eq!(run(&config, Some("GLOBEX")).unwrap(), run(&config, Some("GLOBEX")).unwrap());
    }

    #[test]
    fn ingest_failure_aborts_before_persisting() {
        let (_dir, config) = setup("empresas;valor\nACME;10\n");
        let err = run(&config, None).unwrap_err();
        assert!(matches!(err, PipelineError::Ingest(IngestError::MissingColumn { .. })));
        assert!(!config.db.exists());
    }

    #[test]
    fn unopenable_store_is_fatal() {
        let (dir, mut config) = setup(CSV);
        config.db = dir.path().join("no").join("such").join("dir.db");
        let err = run(&config, None).unwrap_err();
        assert!(matches!(err, PipelineError::Store(_)));
    }

    #[test]
    fn empty_dataset_builds_an_empty_dashboard() {
        let dash = build_dashboard(Dataset::default(), &BinEdges::default(), None);
        assert!(dash.selection.is_none());
        assert!(dash.charts.bars.is_empty());
        assert!(dash.charts.histogram.is_empty());
        // the reference box does not depend on the dataset
        assert_eq!(dash.charts.summary.observation_count(), 105);
    }

    #[test]
    fn configured_edges_drive_classification() {
        let (_dir, mut config) = setup(CSV);
        config.edges = BinEdges::new([0.0, 20.0, 40.0, 60.0, 80.0, 100.0]).unwrap();
        let dash = run(&config, None).unwrap();
        // 100 sits on the inclusive top edge, so nothing is left out
        assert_eq!(dash.unclassified, 0);
    }

    #[test]
    fn dashboard_serializes_selection_status() {
        let (_dir, config) = setup(CSV);
        let dash = run(&config, Some("GLOBEX")).unwrap();
        let json = serde_json::to_value(&dash).unwrap();
        assert_eq!(json["selection"]["status"], "found");
        assert_eq!(json["selection"]["metrics"]["value"], 20.0);
        assert_eq!(json["charts"]["summary"]["kind"], "box");
    }
}
