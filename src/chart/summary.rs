use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::Serialize;

use crate::color::Rgb;

use super::{axis, Channel, ChartData, ChartKind, ChartSpec, Encoding};

/// Seed of the reference sample generator.
pub const REFERENCE_SEED: u64 = 42;
/// Number of normally distributed draws.
pub const REFERENCE_DRAWS: usize = 100;
const REFERENCE_LOC: f64 = 50.0;
const REFERENCE_SCALE: f64 = 10.0;
/// Extremes appended after the draws.
pub const INJECTED_EXTREMES: [f64; 5] = [100.0, 110.0, 120.0, 20.0, 10.0];

/// Whisker reach in multiples of the interquartile range.
const WHISKER_COEF: f64 = 1.5;

const BOX_FILL: Rgb = Rgb::from_hex(0xadd8e6);

/// The fixed illustrative sample behind the box chart: 100 draws of
/// `N(50, 10)` followed by [`INJECTED_EXTREMES`].
///
/// Unrelated to the loaded companies.
pub fn reference_sample() -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(REFERENCE_SEED);
    let mut sample: Vec<f64> = match Normal::new(REFERENCE_LOC, REFERENCE_SCALE) {
        Ok(normal) => normal.sample_iter(&mut rng).take(REFERENCE_DRAWS).collect(),
        Err(_) => Vec::new(),
    };
    sample.extend_from_slice(&INJECTED_EXTREMES);
    sample
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStats {
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation.
    pub std: f64,
}

/// Mean, median and population standard deviation; `None` for no values.
pub fn summary_stats(values: &[f64]) -> Option<SummaryStats> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let sorted = sorted(values);
    Some(SummaryStats {
        mean,
        median: quantile(&sorted, 0.5),
        std: var.sqrt(),
    })
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut v = values.to_vec();
    v.sort_by(f64::total_cmp);
    v
}

/// Linearly interpolated quantile of already sorted, non-empty data.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

// ---------------------------------------------------------------------------
// Box chart payload
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    Solid,
    Dashed,
    DashDot,
}

/// Annotated horizontal line drawn across the box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceLine {
    pub label: String,
    pub value: f64,
    pub style: LineStyle,
    pub color: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FiveNumber {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxData {
    pub count: usize,
    pub fill: Rgb,
    pub five_number: Option<FiveNumber>,
    pub outliers: Vec<f64>,
    pub reference_lines: Vec<ReferenceLine>,
}

/// Box summary with whiskers at the furthest points within 1.5 IQR.
fn five_number(sorted: &[f64]) -> (FiveNumber, Vec<f64>) {
    let q1 = quantile(sorted, 0.25);
    let q3 = quantile(sorted, 0.75);
    let iqr = q3 - q1;
    let lo_fence = q1 - WHISKER_COEF * iqr;
    let hi_fence = q3 + WHISKER_COEF * iqr;

    let inside = sorted.iter().copied().filter(|v| (lo_fence..=hi_fence).contains(v));
    let lower_whisker = inside.clone().next().unwrap_or(q1).min(q1);
    let upper_whisker = inside.last().unwrap_or(q3).max(q3);
    let outliers = sorted
        .iter()
        .copied()
        .filter(|v| *v < lower_whisker || *v > upper_whisker)
        .collect();

    (
        FiveNumber {
            lower_whisker,
            q1,
            median: quantile(sorted, 0.5),
            q3,
            upper_whisker,
        },
        outliers,
    )
}

fn reference_lines(stats: &SummaryStats) -> Vec<ReferenceLine> {
    let line = |name: &str, value: f64, style, color| ReferenceLine {
        label: format!("{name}: {value:.2}"),
        value,
        style,
        color,
    };
    vec![
        line("Média", stats.mean, LineStyle::Dashed, Rgb::from_hex(0xff0000)),
        line("Mediana", stats.median, LineStyle::Solid, Rgb::from_hex(0x000000)),
        line(
            "Média + 1 Desvio Padrão",
            stats.mean + stats.std,
            LineStyle::DashDot,
            Rgb::from_hex(0xffa500),
        ),
        line(
            "Média - 1 Desvio Padrão",
            stats.mean - stats.std,
            LineStyle::DashDot,
            Rgb::from_hex(0x800080),
        ),
    ]
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Box chart over `sample` with mean, median and the ±1 std band as
/// reference lines.
pub fn build_summary_spec(sample: &[f64]) -> ChartSpec {
    let stats = summary_stats(sample);
    let (five_number, outliers) = if sample.is_empty() {
        (None, Vec::new())
    } else {
        let (f, o) = five_number(&sorted(sample));
        (Some(f), o)
    };

    ChartSpec {
        kind: ChartKind::Box,
        title: "Boxplot de TODAS as empresas Trending Tickers, no momento".to_string(),
        axis_labels: axis("", "Valores"),
        encodings: vec![Encoding::new(Channel::Y, "Valores")],
        summary_stats: stats,
        data: ChartData::Box(BoxData {
            count: sample.len(),
            fill: BOX_FILL,
            five_number,
            outliers,
            reference_lines: stats.as_ref().map(reference_lines).unwrap_or_default(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn reference_sample_has_draws_plus_extremes() {
        let sample = reference_sample();
        assert_eq!(sample.len(), 105);
        assert_eq!(&sample[100..], &INJECTED_EXTREMES);
    }

    #[test]
    fn reference_stats_are_bit_for_bit_reproducible() {
        let a = build_summary_spec(&reference_sample()).summary_stats.unwrap();
        let b = build_summary_spec(&reference_sample()).summary_stats.unwrap();
        assert_eq!(a.mean.to_bits(), b.mean.to_bits());
        assert_eq!(a.median.to_bits(), b.median.to_bits());
        assert_eq!(a.std.to_bits(), b.std.to_bits());
    }

    #[test]
    fn population_std_and_even_median() {
        let stats = summary_stats(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!(approx_eq(stats.mean, 5.0));
        assert!(approx_eq(stats.std, 2.0));
        assert!(approx_eq(stats.median, 4.5));
    }

    #[test]
    fn reference_lines_bracket_the_mean_by_one_std() {
        let spec = build_summary_spec(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let stats = spec.summary_stats.unwrap();
        let ChartData::Box(data) = &spec.data else {
            panic!("expected box payload");
        };
        let values: Vec<f64> = data.reference_lines.iter().map(|l| l.value).collect();
        assert_eq!(values.len(), 4);
        assert!(approx_eq(values[0], 3.0));
        assert!(approx_eq(values[1], 3.0));
        assert!(approx_eq(values[2], stats.mean + stats.std));
        assert!(approx_eq(values[3], stats.mean - stats.std));
        assert_eq!(data.reference_lines[0].label, "Média: 3.00");
    }

    #[test]
    fn injected_extremes_show_up_as_outliers() {
        let spec = build_summary_spec(&reference_sample());
        let ChartData::Box(data) = &spec.data else {
            panic!("expected box payload");
        };
        for extreme in [10.0, 110.0, 120.0] {
            assert!(data.outliers.contains(&extreme), "{extreme} not flagged");
        }
        let f = data.five_number.unwrap();
        assert!(f.lower_whisker <= f.q1 && f.q1 <= f.median);
        assert!(f.median <= f.q3 && f.q3 <= f.upper_whisker);
    }

    #[test]
    fn quartiles_interpolate_linearly() {
        let (f, outliers) = five_number(&[1.0, 2.0, 3.0, 4.0, 100.0]);
        assert!(approx_eq(f.q1, 2.0));
        assert!(approx_eq(f.q3, 4.0));
        assert!(approx_eq(f.upper_whisker, 4.0));
        assert_eq!(outliers, vec![100.0]);
    }

    #[test]
    fn empty_sample_is_an_empty_box() {
        let spec = build_summary_spec(&[]);
        assert!(spec.summary_stats.is_none());
        assert!(spec.is_empty());
    }
}
