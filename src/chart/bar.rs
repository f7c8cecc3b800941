use std::collections::HashMap;

use serde::Serialize;

use crate::color::{viridis_palette, Rgb};
use crate::data::model::Dataset;

use super::{axis, Channel, ChartData, ChartKind, ChartSpec, Encoding};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    /// Position on the categorical x axis (0-based).
    pub index: usize,
    pub company: String,
    /// Mean `value` over the company's rows.
    pub height: f64,
    /// How many rows were folded into this bar.
    pub rows: usize,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarData {
    pub bars: Vec<Bar>,
}

/// One bar per distinct company, in order of first appearance.
pub fn build_bar_spec(dataset: &Dataset) -> ChartSpec {
    let mut order: Vec<&str> = Vec::new();
    let mut totals: HashMap<&str, (f64, usize)> = HashMap::new();
    for row in &dataset.rows {
        let entry = totals.entry(row.company.as_str()).or_insert_with(|| {
            order.push(row.company.as_str());
            (0.0, 0)
        });
        entry.0 += row.value;
        entry.1 += 1;
    }

    let colors = viridis_palette(order.len());
    let bars = order
        .iter()
        .zip(colors)
        .enumerate()
        .map(|(index, (company, color))| {
            let (sum, rows) = totals[company];
            Bar {
                index,
                company: company.to_string(),
                height: sum / rows as f64,
                rows,
                color,
            }
        })
        .collect();

    ChartSpec {
        kind: ChartKind::GroupedBar,
        title: "Valor da ação por empresa".to_string(),
        axis_labels: axis("Empresas", "Valores ($)"),
        encodings: vec![
            Encoding::new(Channel::X, "company"),
            Encoding::new(Channel::Y, "value"),
            Encoding::new(Channel::Color, "company"),
        ],
        summary_stats: None,
        data: ChartData::Bars(BarData { bars }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CompanyRow;

    fn bars(ds: &Dataset) -> Vec<Bar> {
        match build_bar_spec(ds).data {
            ChartData::Bars(d) => d.bars,
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn keeps_dataset_order() {
        let ds = Dataset::new(vec![
            CompanyRow::new("ZETA", 3.0, 0.0, 0.0),
            CompanyRow::new("ALFA", 1.0, 0.0, 0.0),
            CompanyRow::new("MIKE", 2.0, 0.0, 0.0),
        ]);
        let names: Vec<_> = bars(&ds).into_iter().map(|b| b.company).collect();
        assert_eq!(names, vec!["ZETA", "ALFA", "MIKE"]);
    }

    #[test]
    fn duplicate_companies_collapse_into_one_mean_bar() {
        let ds = Dataset::new(vec![
            CompanyRow::new("ACME", 10.0, 0.0, 0.0),
            CompanyRow::new("GLOBEX", 5.0, 0.0, 0.0),
            CompanyRow::new("ACME", 20.0, 0.0, 0.0),
        ]);
        let bars = bars(&ds);
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].height, 15.0);
        assert_eq!(bars[0].rows, 2);
        assert_eq!(bars[1].index, 1);
    }

    #[test]
    fn colours_follow_company_index() {
        let ds = Dataset::new(vec![
            CompanyRow::new("A", 1.0, 0.0, 0.0),
            CompanyRow::new("B", 1.0, 0.0, 0.0),
        ]);
        let colors: Vec<_> = bars(&ds).into_iter().map(|b| b.color).collect();
        assert_eq!(colors, viridis_palette(2));
    }
}
