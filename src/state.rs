use crate::chart::GeneratedChart;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Most recent generation result (None until a file was processed).
    pub chart: Option<GeneratedChart>,

    /// Show the saved PNG artifact instead of the interactive plot.
    pub show_artifact: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            chart: None,
            show_artifact: false,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a freshly generated chart, clearing any stale error.
    pub fn set_chart(&mut self, chart: GeneratedChart) {
        self.chart = Some(chart);
        self.status_message = None;
    }
}
