use std::path::PathBuf;

use egui::Ui;

use crate::error::Result;

/// A single demo window's content, hosted by [`crate::app::DemoApp`].
///
/// The shell lays the window out as menu bar, controls row, central plot and
/// status bar, and calls the matching hook for each region every frame.
pub trait DemoPanel {
    /// Native window title.
    fn title(&self) -> &str;

    // Optional hooks with default empty impls
    fn render_menu(&mut self, _ui: &mut Ui) {}
    fn render_controls(&mut self, _ui: &mut Ui) {}

    /// Draw the plot into the central area.
    fn render_plot(&mut self, ui: &mut Ui);

    /// Text for the status bar, if any.
    fn status(&self) -> Option<&str> {
        None
    }

    /// Screen rect of the plot drawn in the last frame.
    fn plot_rect(&self) -> Option<egui::Rect> {
        None
    }

    /// A file the plot should be written to; taken once per request.
    fn take_export_request(&mut self) -> Option<PathBuf> {
        None
    }

    /// Outcome of the last export request.
    fn export_finished(&mut self, _result: Result<PathBuf>) {}
}
