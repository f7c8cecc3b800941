use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Ingest
// ---------------------------------------------------------------------------

/// Failure to turn a delimited text source into a [`Dataset`].
///
/// Always fatal to the current run, and always raised before anything is
/// persisted.
///
/// [`Dataset`]: crate::data::model::Dataset
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("cannot read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid {encoding} at byte {offset}", path.display())]
    Encoding {
        path: PathBuf,
        encoding: &'static str,
        offset: usize,
    },

    #[error("missing required column '{column}' (found: {found:?})")]
    MissingColumn {
        column: &'static str,
        found: Vec<String>,
    },

    #[error("row {row}, column '{column}': '{value}' is not a number")]
    Malformed {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("row {row}: empty company name")]
    EmptyCompany { row: usize },

    #[error("malformed delimited text: {0}")]
    Csv(#[from] csv::Error),
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// The relational store could not be opened, read, or written.
///
/// There is no fallback to an empty dataset when this happens.
#[derive(Debug, Error)]
#[error("store unavailable while trying to {operation}: {source}")]
pub struct StoreUnavailable {
    pub operation: &'static str,
    #[source]
    pub source: rusqlite::Error,
}

impl StoreUnavailable {
    pub fn new(operation: &'static str, source: rusqlite::Error) -> Self {
        Self { operation, source }
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// The selected company matched zero rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no rows for company '{company}'")]
pub struct NoMatchError {
    pub company: String,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Fatal failures of one pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Store(#[from] StoreUnavailable),
}
