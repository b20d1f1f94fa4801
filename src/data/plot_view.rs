//! Rendering state of a single plot: title, axes, pen and fit requests.
//!
//! Handlers mutate a [`PlotView`] and then hand it new sample buffers; the
//! panels read it back every frame to configure `egui_plot`.

use eframe::egui;
use egui_plot::{LineStyle, MarkerShape};

/// The visual presentation of a curve (color, width, style, markers).
#[derive(Debug, Clone, PartialEq)]
pub struct Pen {
    pub color: egui::Color32,
    pub width: f32,
    pub style: LineStyle,
    /// Marker drawn at every sample, if any.
    pub marker: Option<Marker>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub shape: MarkerShape,
    pub radius: f32,
    pub fill: egui::Color32,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            color: egui::Color32::GRAY,
            width: 1.5,
            style: LineStyle::Solid,
            marker: None,
        }
    }
}

impl Pen {
    pub fn solid(color: egui::Color32, width: f32) -> Self {
        Self {
            color,
            width,
            ..Default::default()
        }
    }

    pub fn with_marker(mut self, shape: MarkerShape, radius: f32, fill: egui::Color32) -> Self {
        self.marker = Some(Marker {
            shape,
            radius,
            fill,
        });
        self
    }
}

/// Per-axis settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisSettings {
    pub label: String,
    /// Fixed range; `None` leaves the axis to auto-fit.
    pub range: Option<(f64, f64)>,
}

impl AxisSettings {
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            range: None,
        }
    }

    pub fn with_range(mut self, lo: f64, hi: f64) -> Self {
        self.range = Some((lo, hi));
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlotView {
    pub title: String,
    pub x_axis: AxisSettings,
    pub y_axis: AxisSettings,
    /// Lock the data aspect ratio to 1:1.
    pub aspect_locked: bool,
    pub show_grid: bool,
    pub pen: Pen,
    /// Set by handlers, consumed by the panel on the next frame.
    fit_requested: bool,
    /// Set when fixed ranges change and must be pushed into the plot again.
    bounds_dirty: bool,
}

impl PlotView {
    pub fn new(title: impl Into<String>, x_axis: AxisSettings, y_axis: AxisSettings) -> Self {
        Self {
            title: title.into(),
            x_axis,
            y_axis,
            aspect_locked: false,
            show_grid: true,
            pen: Pen::default(),
            fit_requested: false,
            bounds_dirty: true,
        }
    }

    pub fn set_labels(&mut self, x: impl Into<String>, y: impl Into<String>) {
        self.x_axis.label = x.into();
        self.y_axis.label = y.into();
    }

    /// Ask the plot to fit its axes to the current data on the next frame.
    pub fn request_fit(&mut self) {
        self.fit_requested = true;
    }

    pub fn fit_pending(&self) -> bool {
        self.fit_requested
    }

    pub fn take_fit_request(&mut self) -> bool {
        std::mem::take(&mut self.fit_requested)
    }

    pub fn take_bounds_dirty(&mut self) -> bool {
        std::mem::take(&mut self.bounds_dirty)
    }
}
