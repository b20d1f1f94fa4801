//! Window shell shared by all demos.
//!
//! [`DemoApp`] wraps a [`DemoPanel`] and lays out the window as menu bar,
//! controls row, central plot and status bar. It also completes plot exports:
//! a panel queues a file name, the app requests a viewport screenshot and
//! crops the result to the plot rect once it arrives.

mod run;

pub use run::run_demo;

use std::path::PathBuf;

use eframe::egui;
use tracing::debug;

use crate::color_scheme::ColorScheme;
use crate::config::DemoConfig;
use crate::data::export::save_png_region;
use crate::error::DemoError;
use crate::panels::DemoPanel;

pub struct DemoApp<P: DemoPanel> {
    pub panel: P,
    color_scheme: ColorScheme,
    color_scheme_applied: bool,
    /// Export target waiting for its screenshot event.
    pending_export: Option<PathBuf>,
}

impl<P: DemoPanel> DemoApp<P> {
    pub fn new(panel: P, cfg: &DemoConfig) -> Self {
        Self {
            panel,
            color_scheme: cfg.color_scheme,
            color_scheme_applied: false,
            pending_export: None,
        }
    }

    fn render_menu_bar(&mut self, ui: &mut egui::Ui) {
        egui::MenuBar::new().ui(ui, |ui| {
            self.panel.render_menu(ui);
            ui.menu_button("Theme", |ui| {
                for &scheme in ColorScheme::all() {
                    if ui
                        .radio(self.color_scheme == scheme, scheme.label())
                        .clicked()
                    {
                        self.color_scheme = scheme;
                        self.color_scheme_applied = false;
                        ui.close();
                    }
                }
            });
        });
    }

    /// Request a screenshot for a queued export and save it once it arrives.
    fn handle_export(&mut self, ctx: &egui::Context) {
        if let Some(path) = self.panel.take_export_request() {
            debug!(path = %path.display(), "requesting viewport screenshot");
            self.pending_export = Some(path);
            ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(Default::default()));
        }

        if self.pending_export.is_none() {
            return;
        }
        let Some(image) = ctx.input(|i| {
            i.events.iter().rev().find_map(|e| {
                if let egui::Event::Screenshot { image, .. } = e {
                    Some(image.clone())
                } else {
                    None
                }
            })
        }) else {
            return;
        };
        let Some(path) = self.pending_export.take() else {
            return;
        };

        let result = match self.panel.plot_rect() {
            Some(rect) => save_png_region(&image, rect, ctx.pixels_per_point(), &path)
                .map(|()| path),
            None => Err(DemoError::EmptyCapture),
        };
        self.panel.export_finished(result);
    }
}

impl<P: DemoPanel> eframe::App for DemoApp<P> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.color_scheme_applied {
            self.color_scheme.apply(ctx);
            self.color_scheme_applied = true;
        }

        egui::TopBottomPanel::top("demo_menu").show(ctx, |ui| {
            self.render_menu_bar(ui);
        });

        egui::TopBottomPanel::top("demo_controls").show(ctx, |ui| {
            self.panel.render_controls(ui);
        });

        egui::TopBottomPanel::bottom("demo_status").show(ctx, |ui| {
            ui.label(self.panel.status().unwrap_or(""));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.panel.render_plot(ui);
        });

        self.handle_export(ctx);
    }
}
