use serde::Serialize;

use crate::color::{viridis_palette, Rgb, UNCLASSIFIED};
use crate::data::model::Dataset;

use super::{axis, Channel, ChartData, ChartKind, ChartSpec, Encoding};

/// Equal-width buckets over the observed `change_pct` range.
pub const HISTOGRAM_BUCKETS: usize = 10;

/// Stack group for rows without a bin label.
pub const UNCLASSIFIED_GROUP: &str = "unclassified";

/// One stack layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackGroup {
    pub label: String,
    pub color: Rgb,
}

/// `counts[g]` is the number of rows of `groups[g]` inside `[start, end)`
/// (the last bucket is closed).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub start: f64,
    pub end: f64,
    pub counts: Vec<usize>,
}

impl Bucket {
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramData {
    pub groups: Vec<StackGroup>,
    pub buckets: Vec<Bucket>,
    /// Row count across all buckets and groups; equals the dataset size.
    pub total: usize,
}

/// Bucket edges spanning `[lo, hi]`; a degenerate range is widened by 0.5.
fn bucket_edges(lo: f64, hi: f64) -> Vec<f64> {
    let (lo, hi) = if lo == hi { (lo - 0.5, hi + 0.5) } else { (lo, hi) };
    let width = (hi - lo) / HISTOGRAM_BUCKETS as f64;
    (0..=HISTOGRAM_BUCKETS)
        .map(|i| if i == HISTOGRAM_BUCKETS { hi } else { lo + width * i as f64 })
        .collect()
}

fn bucket_of(edges: &[f64], x: f64) -> usize {
    // index of the last edge <= x, clamped so that the max lands in the last bucket
    let idx = edges.partition_point(|&e| e <= x);
    idx.saturating_sub(1).min(HISTOGRAM_BUCKETS - 1)
}

/// Stacked histogram of `change_pct`, one stack layer per bin label.
///
/// `labels` fixes the layer order; rows without a label are counted in an
/// extra [`UNCLASSIFIED_GROUP`] layer so that no row is dropped. Labels found
/// on rows but missing from `labels` are appended after them.
pub fn build_histogram_spec(dataset: &Dataset, labels: &[&str]) -> ChartSpec {
    let mut names: Vec<String> = labels.iter().map(|l| l.to_string()).collect();
    for row in &dataset.rows {
        if let Some(label) = &row.bin_label {
            if !names.contains(label) {
                names.push(label.clone());
            }
        }
    }
    let has_unclassified = dataset.rows.iter().any(|r| r.bin_label.is_none());

    let mut groups: Vec<StackGroup> = names
        .iter()
        .zip(viridis_palette(names.len()))
        .map(|(label, color)| StackGroup {
            label: label.clone(),
            color,
        })
        .collect();
    if has_unclassified {
        groups.push(StackGroup {
            label: UNCLASSIFIED_GROUP.to_string(),
            color: UNCLASSIFIED,
        });
    }

    let range = dataset
        .rows
        .iter()
        .map(|r| r.change_pct)
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        });

    let mut buckets = Vec::new();
    if let Some((lo, hi)) = range {
        let edges = bucket_edges(lo, hi);
        buckets = edges
            .windows(2)
            .map(|w| Bucket {
                start: w[0],
                end: w[1],
                counts: vec![0; groups.len()],
            })
            .collect();

        for row in &dataset.rows {
            let group = match &row.bin_label {
                Some(label) => names.iter().position(|n| n == label),
                None => Some(groups.len() - 1),
            };
            if let Some(g) = group {
                buckets[bucket_of(&edges, row.change_pct)].counts[g] += 1;
            }
        }
    }

    let total = buckets.iter().map(Bucket::total).sum();

    ChartSpec {
        kind: ChartKind::StackedHistogram,
        title: "Histograma: Quantidade de empresas por % de Variação do valor da ação".to_string(),
        axis_labels: axis("Variação (%)", "Frequência (Empresas)"),
        encodings: vec![
            Encoding::new(Channel::X, "change_pct"),
            Encoding::new(Channel::Y, "count"),
            Encoding::new(Channel::Stack, "bin_label"),
            Encoding::new(Channel::Color, "bin_label"),
        ],
        summary_stats: None,
        data: ChartData::Histogram(HistogramData {
            groups,
            buckets,
            total,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::bins::{classify, BinEdges, DEFAULT_LABELS};
    use crate::data::model::CompanyRow;

    fn histogram(ds: &Dataset) -> HistogramData {
        match build_histogram_spec(ds, &DEFAULT_LABELS).data {
            ChartData::Histogram(d) => d,
            other => panic!("unexpected payload {other:?}"),
        }
    }

    fn classified(pcts: &[f64]) -> Dataset {
        let rows = pcts
            .iter()
            .enumerate()
            .map(|(i, &p)| CompanyRow::new(format!("C{i}"), 1.0, 1.0, p))
            .collect();
        classify(Dataset::new(rows), &BinEdges::default(), &DEFAULT_LABELS)
    }

    #[test]
    fn unclassified_rows_are_counted() {
        let ds = classified(&[1.0, 5.0, 100.0]);
        let h = histogram(&ds);
        assert_eq!(h.total, 3);
        assert_eq!(h.buckets.len(), HISTOGRAM_BUCKETS);

        let last_group = h.groups.last().unwrap();
        assert_eq!(last_group.label, UNCLASSIFIED_GROUP);
        assert_eq!(last_group.color, UNCLASSIFIED);

        let unclassified_idx = h.groups.len() - 1;
        let last_bucket = h.buckets.last().unwrap();
        assert_eq!(last_bucket.counts[unclassified_idx], 1);
    }

    #[test]
    fn no_unclassified_layer_when_every_row_has_a_label() {
        let h = histogram(&classified(&[1.0, 5.0, 10.0]));
        assert_eq!(h.groups.len(), DEFAULT_LABELS.len());
        assert!(h.groups.iter().all(|g| g.label != UNCLASSIFIED_GROUP));
    }

    #[test]
    fn buckets_are_equal_width_over_the_observed_range() {
        let h = histogram(&classified(&[0.0, 10.0]));
        assert_eq!(h.buckets[0].start, 0.0);
        assert_eq!(h.buckets[9].end, 10.0);
        assert!((h.buckets[3].end - h.buckets[3].start - 1.0).abs() < 1e-12);
        assert_eq!(h.buckets[0].total(), 1);
        assert_eq!(h.buckets[9].total(), 1);
    }

    #[test]
    fn degenerate_range_is_widened() {
        let h = histogram(&classified(&[3.0, 3.0]));
        assert_eq!(h.buckets[0].start, 2.5);
        assert_eq!(h.buckets[9].end, 3.5);
        assert_eq!(h.total, 2);
        assert_eq!(h.buckets.iter().filter(|b| b.total() == 2).count(), 1);
    }

    #[test]
    fn empty_dataset_has_no_buckets() {
        let h = histogram(&Dataset::default());
        assert!(h.buckets.is_empty());
        assert_eq!(h.total, 0);
    }
}
