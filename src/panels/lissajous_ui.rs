use egui::Ui;

use super::controls::param_slider;
use super::panel_trait::DemoPanel;
use super::plot_frame::{draw_series, show_view};
use crate::config::LissajousConfig;
use crate::data::lissajous::LissajousState;

pub struct LissajousPanel {
    pub state: LissajousState,
}

impl LissajousPanel {
    pub fn new(cfg: &LissajousConfig) -> Self {
        Self {
            state: LissajousState::new(cfg),
        }
    }
}

impl Default for LissajousPanel {
    fn default() -> Self {
        Self::new(&LissajousConfig::default())
    }
}

impl DemoPanel for LissajousPanel {
    fn title(&self) -> &str {
        "Lissajous figure"
    }

    fn render_controls(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            if let Some(raw) = param_slider(ui, &self.state.freq1) {
                self.state.set_freq1(raw);
            }
            ui.separator();
            if let Some(raw) = param_slider(ui, &self.state.freq2) {
                self.state.set_freq2(raw);
            }
            ui.separator();
            if let Some(raw) = param_slider(ui, &self.state.phase) {
                self.state.set_phase(raw);
            }
        });
    }

    fn render_plot(&mut self, ui: &mut Ui) {
        let points = self.state.curve().points();
        let pen = self.state.view.pen.clone();
        show_view(ui, "lissajous_plot", &mut self.state.view, |plot_ui| {
            draw_series(plot_ui, "curve", points, &pen);
        });
    }
}
