mod app;
mod chart;
mod data;
mod state;
mod ui;

use app::AssayChartApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Assay Chart – CSV to Graph",
        options,
        Box::new(|cc| {
            // Install image loaders so egui can show the saved PNG artifact.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(AssayChartApp::default()))
        }),
    )
}
