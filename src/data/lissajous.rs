//! Lissajous curve viewer state.

use tracing::debug;

use crate::config::LissajousConfig;
use crate::data::parameter::{format_value, SliderParam};
use crate::data::plot_view::{AxisSettings, Pen, PlotView};
use crate::data::samples::{linspace, SampleBuffer};

/// `x = sin(a·t + δ)`, `y = sin(b·t)` evaluated on `t`.
pub fn compute_curve(a: f64, b: f64, delta: f64, t: &[f64]) -> SampleBuffer {
    let x = t.iter().map(|&t| (a * t + delta).sin()).collect();
    let y = t.iter().map(|&t| (b * t).sin()).collect();
    SampleBuffer::new(x, y)
}

pub fn title_for(a: f64, b: f64, delta: f64) -> String {
    format!(
        "a = {}, b = {}, δ = {}",
        format_value(a),
        format_value(b),
        format_value(delta)
    )
}

pub struct LissajousState {
    pub freq1: SliderParam,
    pub freq2: SliderParam,
    pub phase: SliderParam,
    t: Vec<f64>,
    curve: SampleBuffer,
    pub view: PlotView,
}

impl LissajousState {
    pub fn new(cfg: &LissajousConfig) -> Self {
        let mut view = PlotView::new(
            String::new(),
            AxisSettings::labeled("x").with_range(-1.1, 1.1),
            AxisSettings::labeled("y").with_range(-1.1, 1.1),
        );
        view.aspect_locked = true;
        view.pen = Pen::solid(egui::Color32::BLACK, 3.0);

        let mut state = Self {
            freq1: cfg.freq1_param(),
            freq2: cfg.freq2_param(),
            phase: cfg.phase_param(),
            t: linspace(0.0, cfg.t_end, cfg.steps),
            curve: SampleBuffer::default(),
            view,
        };
        state.recompute();
        state
    }

    pub fn set_freq1(&mut self, raw: i32) {
        self.freq1.set_raw(raw);
        self.recompute();
    }

    pub fn set_freq2(&mut self, raw: i32) {
        self.freq2.set_raw(raw);
        self.recompute();
    }

    pub fn set_phase(&mut self, raw: i32) {
        self.phase.set_raw(raw);
        self.recompute();
    }

    /// Current `(a, b, δ)`.
    pub fn params(&self) -> (f64, f64, f64) {
        (self.freq1.value(), self.freq2.value(), self.phase.value())
    }

    pub fn t_grid(&self) -> &[f64] {
        &self.t
    }

    pub fn curve(&self) -> &SampleBuffer {
        &self.curve
    }

    fn recompute(&mut self) {
        let (a, b, delta) = self.params();
        debug!(a, b, delta, "recomputing Lissajous curve");
        self.curve = compute_curve(a, b, delta, &self.t);
        self.view.title = title_for(a, b, delta);
    }
}
