//! Chart specs: renderer-agnostic descriptions of the four dashboard charts.
//!
//! Every builder is a pure function of its inputs. A spec carries the data to
//! draw, its channel encodings, titles, and (for the box chart) summary
//! statistics. Rasterizing it is the shell's job.
//!
//! ```text
//!   reference sample ──► summary   ──► Box
//!   Dataset          ──► bar       ──► GroupedBar
//!   classified Dataset ► histogram ──► StackedHistogram
//!   Dataset          ──► scatter   ──► Scatter
//! ```

use serde::Serialize;

use crate::data::model::Dataset;

pub mod bar;
pub mod histogram;
pub mod scatter;
pub mod summary;

pub use bar::BarData;
pub use histogram::HistogramData;
pub use scatter::ScatterData;
pub use summary::{BoxData, SummaryStats};

// ---------------------------------------------------------------------------
// Spec types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Box,
    GroupedBar,
    StackedHistogram,
    Scatter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AxisLabels {
    pub x: String,
    pub y: String,
}

/// Visual channel a data field is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    X,
    Y,
    Color,
    Shape,
    Stack,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Encoding {
    pub channel: Channel,
    pub field: String,
}

impl Encoding {
    pub fn new(channel: Channel, field: &str) -> Self {
        Self {
            channel,
            field: field.to_string(),
        }
    }
}

/// Chart payload, one variant per chart kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "values", rename_all = "snake_case")]
pub enum ChartData {
    Box(BoxData),
    Bars(BarData),
    Histogram(HistogramData),
    Scatter(ScatterData),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub axis_labels: AxisLabels,
    pub encodings: Vec<Encoding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_stats: Option<SummaryStats>,
    pub data: ChartData,
}

impl ChartSpec {
    /// Number of input observations the chart represents.
    pub fn observation_count(&self) -> usize {
        match &self.data {
            ChartData::Box(d) => d.count,
            ChartData::Bars(d) => d.bars.iter().map(|b| b.rows).sum(),
            ChartData::Histogram(d) => d.total,
            ChartData::Scatter(d) => d.points.len(),
        }
    }

    /// Whether there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.observation_count() == 0
    }
}

fn axis(x: &str, y: &str) -> AxisLabels {
    AxisLabels {
        x: x.to_string(),
        y: y.to_string(),
    }
}

// ---------------------------------------------------------------------------
// All four charts
// ---------------------------------------------------------------------------

/// The four charts shown regardless of the selected company.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Charts {
    pub summary: ChartSpec,
    pub bars: ChartSpec,
    pub histogram: ChartSpec,
    pub scatter: ChartSpec,
}

/// Build every chart. `classified` must already carry bin labels; `labels` gives
/// their stacking order.
pub fn build_all(reference: &[f64], classified: &Dataset, labels: &[&str]) -> Charts {
    Charts {
        summary: summary::build_summary_spec(reference),
        bars: bar::build_bar_spec(classified),
        histogram: histogram::build_histogram_spec(classified, labels),
        scatter: scatter::build_scatter_spec(classified),
    }
}
