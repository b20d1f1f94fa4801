use egui::{PointerButton, Ui};
use egui_plot::Line;
use tracing::error;

use super::panel_trait::DemoPanel;
use super::plot_frame::{draw_series, show_view};
use crate::config::RosenbrockConfig;
use crate::data::minimizer::MinimizerState;
use crate::optimize::Method;

pub struct RosenbrockPanel {
    pub state: MinimizerState,
    status: String,
}

impl RosenbrockPanel {
    pub fn new(cfg: &RosenbrockConfig) -> Self {
        Self {
            state: MinimizerState::new(cfg),
            status: String::new(),
        }
    }

    /// Pointer handler for the plot; a failed run is reported in the status bar.
    pub fn handle_pointer(&mut self, button: PointerButton, double_click: bool, point: [f64; 2]) {
        match self.state.on_pointer(button, double_click, point) {
            None => {}
            Some(Ok(report)) => self.status = report.status_line(),
            Some(Err(e)) => {
                error!(error = %e, "minimization run failed");
                self.status = format!("Method: {}, {e}", self.state.method());
            }
        }
    }
}

impl Default for RosenbrockPanel {
    fn default() -> Self {
        Self::new(&RosenbrockConfig::default())
    }
}

/// The pointer event the plot saw this frame, if any.
fn pointer_event(resp: &egui::Response) -> Option<(PointerButton, bool)> {
    [PointerButton::Primary, PointerButton::Secondary, PointerButton::Middle]
        .into_iter()
        .find_map(|b| {
            if resp.double_clicked_by(b) {
                Some((b, true))
            } else if resp.clicked_by(b) {
                Some((b, false))
            } else {
                None
            }
        })
}

impl DemoPanel for RosenbrockPanel {
    fn title(&self) -> &str {
        "Rosenbrock function minimization"
    }

    fn render_controls(&mut self, ui: &mut Ui) {
        let mut selected = self.state.method();
        ui.horizontal(|ui| {
            egui::ComboBox::from_label("Method")
                .selected_text(selected.name())
                .show_ui(ui, |ui| {
                    for &m in Method::all() {
                        ui.selectable_value(&mut selected, m, m.name());
                    }
                });
        });
        self.state.select_method(selected);
    }

    fn render_plot(&mut self, ui: &mut Ui) {
        let mut view = std::mem::take(&mut self.state.view);
        let state = &self.state;
        let resp = show_view(ui, "rosenbrock_plot", &mut view, |plot_ui| {
            for line in state.contours() {
                plot_ui.line(
                    Line::new("contour", line.points.clone())
                        .color(state.level_color(line.level))
                        .width(1.0),
                );
            }
            if let Some(path) = state.path() {
                draw_series(plot_ui, "path", path.points().to_vec(), &state.path_pen);
            }
            let event = pointer_event(plot_ui.response());
            event.zip(plot_ui.pointer_coordinate())
        });
        self.state.view = view;

        if let Some(((button, double_click), coord)) = resp.inner.inner {
            self.handle_pointer(button, double_click, [coord.x, coord.y]);
        }
    }

    fn status(&self) -> Option<&str> {
        (!self.status.is_empty()).then_some(self.status.as_str())
    }
}
