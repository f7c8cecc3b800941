use std::path::PathBuf;

use crate::config::Config;
use crate::pipeline::{self, Dashboard};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Where the pipeline reads from and persists to.
    pub config: Config,

    /// Company picked in the selector (None → first company).
    pub selected: Option<String>,

    /// Result of the latest pipeline run (None after a fatal error).
    pub dashboard: Option<Dashboard>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build the state and run the pipeline once.
    pub fn new(config: Config, selected: Option<String>) -> Self {
        let mut state = Self {
            config,
            selected,
            dashboard: None,
            status_message: None,
        };
        state.rerun();
        state
    }

    /// Re-execute the whole pipeline for the current config and selection.
    pub fn rerun(&mut self) {
        match pipeline::run(&self.config, self.selected.as_deref()) {
            Ok(dashboard) => {
                log::info!(
                    "Pipeline run: {} rows, {} companies",
                    dashboard.rows,
                    dashboard.companies.len()
                );
                if self.selected.is_none() {
                    self.selected = dashboard.selection.as_ref().map(|s| s.company().to_string());
                }
                self.dashboard = Some(dashboard);
                self.status_message = None;
            }
            Err(e) => {
                let e = anyhow::Error::new(e);
                log::error!("Pipeline failed: {e:#}");
                self.dashboard = None;
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Change the selected company and re-run.
    pub fn select_company(&mut self, company: String) {
        self.selected = Some(company);
        self.rerun();
    }

    /// Switch to another input file; selection resets to its first company.
    pub fn set_input(&mut self, path: PathBuf) {
        self.config.input = path;
        self.selected = None;
        self.rerun();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_COMPANIES: &str = "empresas;valor;change;change2\nB;1;1;1\nA;2;2;2\n";

    fn config(dir: &tempfile::TempDir, csv: &str) -> Config {
        let input = dir.path().join("input.csv");
        std::fs::write(&input, csv).unwrap();
        Config::new(input, dir.path().join("store.db"))
    }

    #[test]
    fn initial_run_picks_first_company() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(config(&dir, TWO_COMPANIES), None);
        assert_eq!(state.selected.as_deref(), Some("B"));
        assert!(state.dashboard.is_some());
        assert!(state.status_message.is_none());
    }

    #[test]
    fn selecting_reruns_with_new_metrics() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(config(&dir, TWO_COMPANIES), None);
        state.select_company("A".to_string());
        let selection = state.dashboard.as_ref().unwrap().selection.as_ref().unwrap();
        assert_eq!(selection.metrics().unwrap().value, 2.0);
    }

    #[test]
    fn reselecting_the_same_company_rereads_the_input() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(config(&dir, TWO_COMPANIES), None);
        std::fs::write(&state.config.input, "empresas;valor;change;change2\nB;7;1;1\n").unwrap();

        state.select_company("B".to_string());
        let dashboard = state.dashboard.as_ref().unwrap();
        assert_eq!(dashboard.selection.as_ref().unwrap().metrics().unwrap().value, 7.0);
        assert_eq!(dashboard.rows, 1);
    }

    #[test]
    fn failure_clears_dashboard_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(config(&dir, TWO_COMPANIES), None);
        state.set_input(dir.path().join("missing.csv"));
        assert!(state.dashboard.is_none());
        assert!(state.status_message.unwrap().contains("missing.csv"));
    }
}
