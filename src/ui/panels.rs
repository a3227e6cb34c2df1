use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open CSV…").clicked() {
                open_file_dialog(state, ui.ctx());
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(chart) = &state.chart {
            ui.label(format!(
                "{} – {} points, {}",
                chart.dataset.sample_name,
                chart.dataset.len(),
                chart.dataset.axis.label()
            ));
            ui.separator();
            ui.label(format!("saved: {}", chart.artifact.display()));
            ui.separator();
            if ui
                .selectable_label(state.show_artifact, "PNG Preview")
                .clicked()
            {
                state.show_artifact = !state.show_artifact;
            }
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

/// Open the native file picker and run chart generation synchronously on the
/// selected file.
pub fn open_file_dialog(state: &mut AppState, ctx: &egui::Context) {
    let file = rfd::FileDialog::new()
        .set_title("Open assay data")
        .add_filter("CSV files", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match crate::chart::generate(&path) {
            Ok(chart) => {
                // Drop any cached copy of the artifact so the preview refreshes.
                ctx.forget_image(&chart.artifact_uri());
                state.set_chart(chart);
            }
            Err(e) => {
                log::error!("failed to generate chart: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
