use std::collections::HashMap;

use serde::Serialize;

use crate::color::{bright, Rgb};
use crate::data::model::Dataset;

use super::{axis, Channel, ChartData, ChartKind, ChartSpec, Encoding};

/// Marker shapes available to categorical encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    Circle,
    Square,
    Diamond,
}

/// Shapes assigned to companies in order; cycles past the end.
pub const MARKERS: [Marker; 3] = [Marker::Circle, Marker::Square, Marker::Diamond];

/// Style of the `index`-th distinct company.
pub fn style_for(index: usize) -> (Rgb, Marker) {
    (bright(index), MARKERS[index % MARKERS.len()])
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub company: String,
    pub x: f64,
    pub y: f64,
    pub color: Rgb,
    pub marker: Marker,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub company: String,
    pub color: Rgb,
    pub marker: Marker,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterData {
    pub points: Vec<ScatterPoint>,
    pub legend: Vec<LegendEntry>,
}

/// `value` against `change_abs`, one colour + marker per company.
pub fn build_scatter_spec(dataset: &Dataset) -> ChartSpec {
    let mut legend: Vec<LegendEntry> = Vec::new();
    let mut index_of: HashMap<&str, usize> = HashMap::new();

    let points = dataset
        .rows
        .iter()
        .map(|row| {
            let idx = *index_of.entry(row.company.as_str()).or_insert_with(|| {
                let (color, marker) = style_for(legend.len());
                legend.push(LegendEntry {
                    company: row.company.clone(),
                    color,
                    marker,
                });
                legend.len() - 1
            });
            let entry = &legend[idx];
            ScatterPoint {
                company: row.company.clone(),
                x: row.value,
                y: row.change_abs,
                color: entry.color,
                marker: entry.marker,
            }
        })
        .collect();

    ChartSpec {
        kind: ChartKind::Scatter,
        title: "Gráfico de Dispersão: Valor x Variação ($)".to_string(),
        axis_labels: axis("Valor ($)", "Variação ($)"),
        encodings: vec![
            Encoding::new(Channel::X, "value"),
            Encoding::new(Channel::Y, "change_abs"),
            Encoding::new(Channel::Color, "company"),
            Encoding::new(Channel::Shape, "company"),
        ],
        summary_stats: None,
        data: ChartData::Scatter(ScatterData { points, legend }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::BRIGHT;
    use crate::data::model::CompanyRow;

    fn scatter(ds: &Dataset) -> ScatterData {
        match build_scatter_spec(ds).data {
            ChartData::Scatter(d) => d,
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn one_point_per_row_with_value_and_change() {
        let ds = Dataset::new(vec![
            CompanyRow::new("A", 10.0, 1.5, 0.0),
            CompanyRow::new("B", 20.0, -2.0, 0.0),
            CompanyRow::new("A", 11.0, 0.5, 0.0),
        ]);
        let s = scatter(&ds);
        assert_eq!(s.points.len(), 3);
        assert_eq!((s.points[1].x, s.points[1].y), (20.0, -2.0));
        assert_eq!(s.legend.len(), 2);
        assert_eq!(s.points[0].marker, s.points[2].marker);
        assert_eq!(s.points[0].color, s.points[2].color);
        assert_ne!(s.points[0].marker, s.points[1].marker);
    }

    #[test]
    fn styles_cycle_past_the_palette() {
        let rows = (0..12)
            .map(|i| CompanyRow::new(format!("C{i}"), i as f64, 0.0, 0.0))
            .collect();
        let s = scatter(&Dataset::new(rows));
        assert_eq!(s.legend[3].marker, Marker::Circle);
        assert_eq!(s.legend[4].marker, Marker::Square);
        assert_eq!(s.legend[BRIGHT.len()].color, s.legend[0].color);
        assert_eq!(s.legend[11].color, BRIGHT[1]);
    }

    #[test]
    fn empty_dataset_has_no_points() {
        let s = scatter(&Dataset::default());
        assert!(s.points.is_empty());
        assert!(s.legend.is_empty());
    }
}
