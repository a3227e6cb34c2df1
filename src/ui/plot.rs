use eframe::egui::{self, Color32, Ui};
use egui_plot::{Legend, Line, LineStyle, MarkerShape, Plot, PlotPoints, Points};

use crate::chart::GeneratedChart;
use crate::data::model::FLUORESCENCE_LABEL;
use crate::state::AppState;

/// Same colors as the PNG artifact (soft blue / soft coral).
const RAW_COLOR: Color32 = Color32::from_rgb(0x8c, 0xb4, 0xd2);
const SMOOTH_COLOR: Color32 = Color32::from_rgb(0xf3, 0xa6, 0x83);

// ---------------------------------------------------------------------------
// Assay chart (central panel)
// ---------------------------------------------------------------------------

/// Render the chart in the central panel: either the interactive plot or a
/// preview of the saved PNG artifact.
pub fn assay_plot(ui: &mut Ui, state: &AppState) {
    let chart = match &state.chart {
        Some(c) => c,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a CSV file to generate a chart  (File → Open CSV…)");
            });
            return;
        }
    };

    if state.show_artifact {
        artifact_preview(ui, chart);
        return;
    }

    let raw_line: PlotPoints = series_points(&chart.dataset.x, &chart.dataset.y);
    let raw_markers: PlotPoints = series_points(&chart.dataset.x, &chart.dataset.y);
    let trend: PlotPoints = series_points(&chart.curve.x, &chart.curve.y);

    Plot::new("assay_plot")
        .legend(Legend::default())
        .x_axis_label(chart.dataset.axis.label())
        .y_axis_label(FLUORESCENCE_LABEL)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(raw_line)
                    .name("Original Data")
                    .color(RAW_COLOR)
                    .width(2.0),
            );
            // Same name as the line so both share one legend entry.
            plot_ui.points(
                Points::new(raw_markers)
                    .name("Original Data")
                    .shape(MarkerShape::Circle)
                    .radius(4.0)
                    .color(RAW_COLOR),
            );
            plot_ui.line(
                Line::new(trend)
                    .name("Smooth Trend")
                    .color(SMOOTH_COLOR)
                    .width(3.0)
                    .style(LineStyle::Dashed { length: 10.0 }),
            );
        });
}

fn series_points(x: &[f64], y: &[f64]) -> PlotPoints<'static> {
    x.iter().zip(y.iter()).map(|(&xi, &yi)| [xi, yi]).collect()
}

// ---------------------------------------------------------------------------
// Saved-artifact preview
// ---------------------------------------------------------------------------

fn artifact_preview(ui: &mut Ui, chart: &GeneratedChart) {
    ui.label(chart.artifact.display().to_string());
    egui::ScrollArea::both().show(ui, |ui: &mut Ui| {
        ui.add(egui::Image::new(chart.artifact_uri()).max_width(ui.available_width()));
    });
}
