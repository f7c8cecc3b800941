use std::collections::HashSet;

use serde::Serialize;

// ---------------------------------------------------------------------------
// CompanyRow – one row of the source file
// ---------------------------------------------------------------------------

/// One company's latest quoted metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyRow {
    /// Company / ticker name. Not guaranteed unique across rows.
    pub company: String,
    /// Current quoted value.
    pub value: f64,
    /// Absolute change.
    pub change_abs: f64,
    /// Percent change.
    pub change_pct: f64,
    /// Range label attached by the bin classifier; `None` until classified or
    /// when `change_pct` falls outside every range.
    pub bin_label: Option<String>,
}

impl CompanyRow {
    pub fn new(company: impl Into<String>, value: f64, change_abs: f64, change_pct: f64) -> Self {
        Self {
            company: company.into(),
            value,
            change_abs,
            change_pct,
            bin_label: None,
        }
    }

    pub fn metrics(&self) -> Metrics {
        Metrics {
            value: self.value,
            change_abs: self.change_abs,
            change_pct: self.change_pct,
        }
    }
}

// ---------------------------------------------------------------------------
// Metrics – what the shell shows for the selected company
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub value: f64,
    pub change_abs: f64,
    pub change_pct: f64,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// Ordered sequence of rows, loaded atomically.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    pub rows: Vec<CompanyRow>,
}

impl Dataset {
    pub fn new(rows: Vec<CompanyRow>) -> Self {
        Self { rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct company names in order of first appearance.
    pub fn companies(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .filter(|row| seen.insert(row.company.as_str()))
            .map(|row| row.company.clone())
            .collect()
    }
}
