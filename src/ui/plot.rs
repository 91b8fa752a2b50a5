use std::f64::consts::TAU;

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Polygon, Text,
};

use crate::color;
use crate::data::model::Table;
use crate::view::{ChartKind, ChartSpec, Stacking};

const PLOT_HEIGHT: f32 = 320.0;
const PIE_SEGMENTS: usize = 64;

// ---------------------------------------------------------------------------
// Chart dispatch
// ---------------------------------------------------------------------------

/// Draw one chart request.
pub fn chart(ui: &mut Ui, spec: &ChartSpec) {
    match spec.kind {
        ChartKind::Bar => bar_chart(ui, spec),
        ChartKind::Line => line_chart(ui, spec),
        ChartKind::Pie => pie_chart(ui, spec),
        ChartKind::Heatmap => heatmap(ui, spec),
    }
}

/// Text of every cell in `column`, empty if the column is absent.
fn labels(data: &Table, column: &str) -> Vec<String> {
    match data.column_index(column) {
        Ok(idx) => data.rows().iter().map(|r| r[idx].to_string()).collect(),
        Err(_) => Vec::new(),
    }
}

/// Axis formatter that prints category names at integer positions.
fn category_formatter(
    categories: Vec<String>,
) -> impl Fn(egui_plot::GridMark, &std::ops::RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let i = mark.value.round();
        if (mark.value - i).abs() > 1e-6 || i < 0.0 {
            return String::new();
        }
        categories.get(i as usize).cloned().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Bar charts (stacked, grouped or single series)
// ---------------------------------------------------------------------------

fn bar_chart(ui: &mut Ui, spec: &ChartSpec) {
    let categories = labels(&spec.data, &spec.x_field);
    let n_series = spec.y_fields.len();
    let grouped = spec.stacking == Stacking::Grouped && n_series > 1;
    let stacked = spec.stacking == Stacking::Stacked;
    let width = if grouped { 0.8 / n_series as f64 } else { 0.7 };

    let mut charts: Vec<BarChart> = Vec::with_capacity(n_series);
    for (j, field) in spec.y_fields.iter().enumerate() {
        let Ok(values) = spec.data.numeric_column(field) else {
            continue;
        };
        let offset = if grouped {
            (j as f64 - (n_series as f64 - 1.0) / 2.0) * width
        } else {
            0.0
        };
        let color = color::series_color(&spec.colors, j, n_series);

        let bars: Vec<Bar> = bar_heights(&values, stacked)
            .into_iter()
            .map(|(i, v)| {
                Bar::new(i as f64 + offset, v)
                    .width(width)
                    .name(categories.get(i).cloned().unwrap_or_default())
                    .fill(color)
            })
            .collect();

        let mut chart = BarChart::new(bars).name(field).color(color);
        if stacked {
            let below: Vec<&BarChart> = charts.iter().collect();
            chart = chart.stack_on(&below);
        }
        charts.push(chart);
    }

    let mut plot = Plot::new(&spec.title)
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_formatter(category_formatter(categories))
        .allow_scroll(false)
        .allow_drag(true)
        .allow_zoom(true);
    if let Some(label) = &spec.y_label {
        plot = plot.y_axis_label(label.clone());
    }

    plot.show(ui, |plot_ui| {
        for chart in charts {
            plot_ui.bar_chart(chart);
        }
    });
}

/// `(row, height)` of the bars drawn for one series. Non-finite values
/// (e.g. a 0/0 percentage) are left out, except in a stack: there every row
/// keeps a bar, at height zero, because `stack_on` pairs bars by position.
fn bar_heights(values: &[f64], stacked: bool) -> Vec<(usize, f64)> {
    values
        .iter()
        .enumerate()
        .filter_map(|(i, &v)| match (v.is_finite(), stacked) {
            (true, _) => Some((i, v)),
            (false, true) => Some((i, 0.0)),
            (false, false) => None,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Line chart with markers
// ---------------------------------------------------------------------------

fn line_chart(ui: &mut Ui, spec: &ChartSpec) {
    let Ok(xs) = spec.data.numeric_column(&spec.x_field) else {
        return;
    };
    let n_series = spec.y_fields.len();

    Plot::new(&spec.title)
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_label(spec.x_field.clone())
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (j, field) in spec.y_fields.iter().enumerate() {
                let Ok(ys) = spec.data.numeric_column(field) else {
                    continue;
                };
                let color = color::series_color(&spec.colors, j, n_series);
                let points: Vec<[f64; 2]> = xs
                    .iter()
                    .zip(&ys)
                    .filter(|(x, y)| x.is_finite() && y.is_finite())
                    .map(|(&x, &y)| [x, y])
                    .collect();

                plot_ui.line(
                    Line::new(PlotPoints::from(points.clone()))
                        .name(field)
                        .color(color)
                        .width(2.0),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .radius(4.0)
                        .color(color),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Outline of the slice from `start` to `end` (radians), split into
/// wedges of at most a quarter turn so each polygon stays convex.
fn slice_polygons(start: f64, end: f64) -> Vec<Vec<[f64; 2]>> {
    let wedges = ((end - start) / (TAU / 4.0)).ceil().max(1.0) as usize;
    let per_wedge = (PIE_SEGMENTS / 4).max(1);
    (0..wedges)
        .map(|w| {
            let a0 = start + (end - start) * w as f64 / wedges as f64;
            let a1 = start + (end - start) * (w + 1) as f64 / wedges as f64;
            let mut points = Vec::with_capacity(per_wedge + 2);
            points.push([0.0, 0.0]);
            for s in 0..=per_wedge {
                let a = a0 + (a1 - a0) * s as f64 / per_wedge as f64;
                points.push([a.cos(), a.sin()]);
            }
            points
        })
        .collect()
}

fn pie_chart(ui: &mut Ui, spec: &ChartSpec) {
    let names = labels(&spec.data, &spec.x_field);
    let Some(Ok(values)) = spec.y_fields.first().map(|f| spec.data.numeric_column(f)) else {
        return;
    };
    let total: f64 = values.iter().filter(|v| v.is_finite() && **v > 0.0).sum();
    if total <= 0.0 {
        ui.label("No medals to show.");
        return;
    }

    Plot::new(&spec.title)
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            // Start at twelve o'clock, go clockwise.
            let mut angle = TAU / 4.0;
            for (i, &v) in values.iter().enumerate() {
                if !v.is_finite() || v <= 0.0 {
                    continue;
                }
                let sweep = v / total * TAU;
                let color = color::series_color(&spec.colors, i, values.len());
                let name = names.get(i).cloned().unwrap_or_default();
                let pct = v / total * 100.0;

                let legend = format!("{name} ({pct:.1}%)");
                for wedge in slice_polygons(angle - sweep, angle) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(wedge))
                            .fill_color(color)
                            .stroke(Stroke::new(0.0, color))
                            .name(&legend),
                    );
                }
                angle -= sweep;
            }
        });
}

// ---------------------------------------------------------------------------
// Heatmap (correlation matrix)
// ---------------------------------------------------------------------------

fn heatmap(ui: &mut Ui, spec: &ChartSpec) {
    let row_labels = labels(&spec.data, &spec.x_field);
    let col_labels = spec.y_fields.clone();
    let columns: Vec<Vec<f64>> = spec
        .y_fields
        .iter()
        .map(|f| spec.data.numeric_column(f).unwrap_or_default())
        .collect();
    let n_rows = row_labels.len();

    // Row 0 is drawn at the top.
    let y_labels: Vec<String> = row_labels.iter().rev().cloned().collect();

    Plot::new(&spec.title)
        .height(PLOT_HEIGHT)
        .data_aspect(1.0)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .x_axis_formatter(category_formatter(col_labels))
        .y_axis_formatter(category_formatter(y_labels))
        .show(ui, |plot_ui| {
            for (c, column) in columns.iter().enumerate() {
                for (r, &v) in column.iter().enumerate() {
                    let x = c as f64;
                    let y = (n_rows - 1 - r) as f64;
                    let cell = vec![
                        [x - 0.5, y - 0.5],
                        [x + 0.5, y - 0.5],
                        [x + 0.5, y + 0.5],
                        [x - 0.5, y + 0.5],
                    ];
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(cell))
                            .fill_color(color::heat_color(v))
                            .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );
                    let label = if v.is_finite() {
                        format!("{v:.2}")
                    } else {
                        String::new()
                    };
                    plot_ui.text(Text::new(
                        PlotPoint::new(x, y),
                        RichText::new(label).color(color::heat_text_color(v)),
                    ));
                }
            }
        });
}
