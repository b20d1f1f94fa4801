use std::path::PathBuf;

use egui::Ui;
use tracing::{error, info};

use super::controls::param_slider;
use super::panel_trait::DemoPanel;
use super::plot_frame::{draw_series, show_view};
use crate::config::VanDerPolConfig;
use crate::data::van_der_pol::{OscillatorState, ViewMode};
use crate::error::Result;

pub struct VanDerPolPanel {
    pub state: OscillatorState,
    status: String,
    plot_rect: Option<egui::Rect>,
    export_request: Option<PathBuf>,
}

impl VanDerPolPanel {
    pub fn new(cfg: &VanDerPolConfig) -> Result<Self> {
        Ok(Self {
            state: OscillatorState::new(cfg)?,
            status: String::new(),
            plot_rect: None,
            export_request: None,
        })
    }

    /// Queue an export of the current plot to `VdP plot mu = {μ}.png`.
    pub fn request_export(&mut self) {
        let path = PathBuf::from(self.state.export_file_name());
        info!(path = %path.display(), "plot export requested");
        self.export_request = Some(path);
    }

    fn report(&mut self, result: Result<()>) {
        match result {
            Ok(()) => self.status.clear(),
            Err(e) => self.status = e.to_string(),
        }
    }
}

impl DemoPanel for VanDerPolPanel {
    fn title(&self) -> &str {
        "PyQt5 Example. Van der Pol oscillator solution."
    }

    fn render_menu(&mut self, ui: &mut Ui) {
        ui.menu_button("View", |ui| {
            let current = self.state.mode();
            for mode in [ViewMode::TimeSeries, ViewMode::PhasePortrait] {
                if ui.radio(current == mode, mode.label()).clicked() {
                    let res = self.state.set_mode(mode);
                    self.report(res);
                    ui.close();
                }
            }
        });
        ui.menu_button(format!("{} Export", egui_phosphor::regular::EXPORT), |ui| {
            if ui
                .button(format!("{} Save plot as PNG", egui_phosphor::regular::IMAGE))
                .on_hover_text("Write the plot area to the working directory")
                .clicked()
            {
                self.request_export();
                ui.close();
            }
        });
    }

    fn render_controls(&mut self, ui: &mut Ui) {
        if let Some(raw) = param_slider(ui, &self.state.mu) {
            let res = self.state.set_mu_raw(raw);
            self.report(res);
        }
    }

    fn render_plot(&mut self, ui: &mut Ui) {
        let points = self.state.buffer().points();
        let pen = self.state.view.pen.clone();
        let framed = show_view(ui, "van_der_pol_plot", &mut self.state.view, |plot_ui| {
            draw_series(plot_ui, "x", points, &pen);
        });
        // the export keeps the title and axes, not just the data area
        self.plot_rect = Some(framed.response.rect);
    }

    fn status(&self) -> Option<&str> {
        (!self.status.is_empty()).then_some(self.status.as_str())
    }

    fn plot_rect(&self) -> Option<egui::Rect> {
        self.plot_rect
    }

    fn take_export_request(&mut self) -> Option<PathBuf> {
        self.export_request.take()
    }

    fn export_finished(&mut self, result: Result<PathBuf>) {
        match result {
            Ok(path) => self.status = format!("Saved {}", path.display()),
            Err(e) => {
                error!(error = %e, "plot export failed");
                self.status = format!("Export failed: {e}");
            }
        }
    }
}
