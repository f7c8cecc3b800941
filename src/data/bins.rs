use super::model::Dataset;

/// Edges of the percent-change ranges used by the dashboard.
pub const DEFAULT_EDGES: [f64; 6] = [0.47, 4.814, 9.628, 14.442, 19.256, 24.07];

/// Labels of the five ranges, lowest first.
pub const DEFAULT_LABELS: [&str; 5] = ["faixa1", "faixa2", "faixa3", "faixa4", "faixa5"];

// ---------------------------------------------------------------------------
// BinEdges
// ---------------------------------------------------------------------------

/// Six strictly increasing boundaries defining five ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinEdges([f64; 6]);

impl BinEdges {
    /// Returns `None` unless every edge is finite and strictly greater than the
    /// previous one.
    pub fn new(edges: [f64; 6]) -> Option<Self> {
        let ascending = edges.iter().all(|e| e.is_finite()) && edges.windows(2).all(|w| w[0] < w[1]);
        ascending.then_some(Self(edges))
    }

    /// Index of the range containing `x`.
    ///
    /// Ranges are `[lo, hi)` except the outermost ones: the lowest edge and the
    /// highest edge are both inclusive, so `edges[0]` and `edges[5]` classify.
    /// Anything outside `[edges[0], edges[5]]` (or NaN) has no range.
    pub fn bin_of(&self, x: f64) -> Option<usize> {
        let e = &self.0;
        if !(x >= e[0] && x <= e[5]) {
            return None;
        }
        // first edge strictly above x, minus one
        let idx = e[1..5].iter().take_while(|&&edge| edge <= x).count();
        Some(idx)
    }
}

impl Default for BinEdges {
    fn default() -> Self {
        Self(DEFAULT_EDGES)
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Attach a range label to every row based on `change_pct`.
///
/// Rows outside all ranges get `None`; that is reported, not treated as an
/// error.
pub fn classify(mut dataset: Dataset, edges: &BinEdges, labels: &[&str; 5]) -> Dataset {
    let mut unclassified = 0usize;
    for row in &mut dataset.rows {
        row.bin_label = edges.bin_of(row.change_pct).map(|i| labels[i].to_string());
        if row.bin_label.is_none() {
            unclassified += 1;
        }
    }
    if unclassified > 0 {
        log::warn!(
            "{unclassified} of {} rows fall outside [{}, {}] and stay unclassified",
            dataset.len(),
            edges.0[0],
            edges.0[5]
        );
    }
    dataset
}
