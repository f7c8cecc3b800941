use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, HLine, Legend, LineStyle, MarkerShape, Plot,
    Points,
};

use crate::chart::histogram::HistogramData;
use crate::chart::scatter::{Marker, ScatterData};
use crate::chart::summary::{self, BoxData};
use crate::chart::{BarData, ChartData, ChartSpec};
use crate::color::Rgb;
use crate::pipeline::{Dashboard, Selection};
use crate::state::AppState;

const PLOT_HEIGHT: f32 = 320.0;

fn color32(c: Rgb) -> Color32 {
    Color32::from_rgb(c.r, c.g, c.b)
}

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the selected company's metrics and the four charts.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(dashboard) = &state.dashboard else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view companies  (File → Open…)");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            metrics_row(ui, dashboard);
            ui.separator();

            chart(ui, "Boxplot", &dashboard.charts.summary);
            chart(ui, "Gráfico de Barras", &dashboard.charts.bars);
            chart(ui, "Histograma", &dashboard.charts.histogram);
            chart(ui, "Gráfico de Dispersão", &dashboard.charts.scatter);
        });
}

fn metrics_row(ui: &mut Ui, dashboard: &Dashboard) {
    ui.label(RichText::new("DADOS DA EMPRESA ESCOLHIDA").italics().strong());

    let Some(selection) = &dashboard.selection else {
        ui.label("No company to select.");
        return;
    };
    ui.label(format!("Empresa escolhida: {}", selection.company()));

    match selection {
        Selection::Found { metrics, .. } => {
            ui.columns(3, |cols| {
                metric(&mut cols[0], "Valor atual", metrics.value);
                metric(&mut cols[1], "Variação ($)", metrics.change_abs);
                metric(&mut cols[2], "Variação (%)", metrics.change_pct);
            });
        }
        Selection::NoMatch { .. } => {
            if let Err(e) = selection.metrics() {
                ui.label(RichText::new(e.to_string()).color(Color32::RED));
            }
        }
    }
}

fn metric(ui: &mut Ui, label: &str, value: f64) {
    ui.label(label);
    ui.label(RichText::new(format!("{value}")).size(28.0));
}

// ---------------------------------------------------------------------------
// Chart dispatch
// ---------------------------------------------------------------------------

fn chart(ui: &mut Ui, heading: &str, spec: &ChartSpec) {
    ui.add_space(8.0);
    ui.heading(heading);
    ui.label(RichText::new(&spec.title).strong());

    if spec.is_empty() {
        ui.label("No data");
        return;
    }

    let plot = Plot::new(heading)
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_label(spec.axis_labels.x.clone())
        .y_axis_label(spec.axis_labels.y.clone());

    match &spec.data {
        ChartData::Box(data) => box_chart(ui, plot, data),
        ChartData::Bars(data) => bar_chart(ui, plot, data),
        ChartData::Histogram(data) => histogram_chart(ui, plot, data),
        ChartData::Scatter(data) => scatter_chart(ui, plot, data),
    }
}

fn line_style(style: summary::LineStyle) -> LineStyle {
    match style {
        summary::LineStyle::Solid => LineStyle::Solid,
        summary::LineStyle::Dashed => LineStyle::Dashed { length: 10.0 },
        summary::LineStyle::DashDot => LineStyle::Dotted { spacing: 6.0 },
    }
}

fn box_chart(ui: &mut Ui, plot: Plot<'_>, data: &BoxData) {
    let Some(f) = data.five_number else {
        return;
    };
    let elem = BoxElem::new(
        0.0,
        BoxSpread::new(f.lower_whisker, f.q1, f.median, f.q3, f.upper_whisker),
    )
    .box_width(0.5)
    .fill(color32(data.fill))
    .stroke(egui::Stroke::new(1.0, Color32::DARK_GRAY));

    let outliers: Vec<[f64; 2]> = data.outliers.iter().map(|&v| [0.0, v]).collect();

    plot.show_x(false).show(ui, |plot_ui| {
        plot_ui.box_plot(BoxPlot::new(vec![elem]).name("Valores"));
        plot_ui.points(
            Points::new(outliers)
                .shape(MarkerShape::Diamond)
                .radius(3.0)
                .color(Color32::DARK_GRAY),
        );
        for line in &data.reference_lines {
            plot_ui.hline(
                HLine::new(line.value)
                    .name(&line.label)
                    .color(color32(line.color))
                    .style(line_style(line.style)),
            );
        }
    });
}

fn bar_chart(ui: &mut Ui, plot: Plot<'_>, data: &BarData) {
    let names: Vec<String> = data.bars.iter().map(|b| b.company.clone()).collect();
    let bars: Vec<Bar> = data
        .bars
        .iter()
        .map(|b| {
            Bar::new(b.index as f64, b.height)
                .name(&b.company)
                .fill(color32(b.color))
                .width(0.8)
        })
        .collect();

    plot.x_axis_formatter(move |mark, _range| {
        let idx = mark.value.round();
        if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        names.get(idx as usize).cloned().unwrap_or_default()
    })
    .show(ui, |plot_ui| {
        plot_ui.bar_chart(BarChart::new(bars).name("Valores ($)"));
    });
}

fn histogram_chart(ui: &mut Ui, plot: Plot<'_>, data: &HistogramData) {
    let mut layers: Vec<BarChart> = Vec::with_capacity(data.groups.len());
    for (g, group) in data.groups.iter().enumerate() {
        let bars = data
            .buckets
            .iter()
            .map(|bucket| {
                Bar::new((bucket.start + bucket.end) / 2.0, bucket.counts[g] as f64)
                    .width(bucket.end - bucket.start)
            })
            .collect();
        let below: Vec<&BarChart> = layers.iter().collect();
        let layer = BarChart::new(bars)
            .name(&group.label)
            .color(color32(group.color))
            .stack_on(&below);
        layers.push(layer);
    }

    plot.show(ui, |plot_ui| {
        for layer in layers {
            plot_ui.bar_chart(layer);
        }
    });
}

fn marker_shape(marker: Marker) -> MarkerShape {
    match marker {
        Marker::Circle => MarkerShape::Circle,
        Marker::Square => MarkerShape::Square,
        Marker::Diamond => MarkerShape::Diamond,
    }
}

fn scatter_chart(ui: &mut Ui, plot: Plot<'_>, data: &ScatterData) {
    plot.show(ui, |plot_ui| {
        for entry in &data.legend {
            let series: Vec<[f64; 2]> = data
                .points
                .iter()
                .filter(|p| p.company == entry.company)
                .map(|p| [p.x, p.y])
                .collect();
            plot_ui.points(
                Points::new(series)
                    .name(&entry.company)
                    .shape(marker_shape(entry.marker))
                    .color(color32(entry.color))
                    .filled(true)
                    .radius(5.0),
            );
        }
    });
}
