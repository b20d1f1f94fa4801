//! Configuration types shared across the demo windows.

use std::ops::RangeInclusive;
use std::path::PathBuf;

use crate::color_scheme::ColorScheme;
use crate::data::parameter::SliderParam;
use crate::data::van_der_pol::Tolerances;
use crate::optimize::Method;

// ─────────────────────────────────────────────────────────────────────────────
// DemoConfig – window / chrome
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration for a demo window.
pub struct DemoConfig {
    /// Native window title. Empty uses the panel's own title.
    pub title: String,
    /// Inner window size in points, used when `native_options` does not set one.
    pub inner_size: [f32; 2],
    /// Open the window maximized; `inner_size` is then the restored size.
    pub maximized: bool,
    /// Optional eframe native-window options.
    pub native_options: Option<eframe::NativeOptions>,
    /// Color scheme / visual theme.
    pub color_scheme: ColorScheme,
    /// SVG rendered into the window icon. Missing or unreadable files are skipped.
    pub icon_path: Option<PathBuf>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            inner_size: [1200.0, 800.0],
            maximized: false,
            native_options: None,
            color_scheme: ColorScheme::default(),
            icon_path: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Lissajous curve viewer
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct LissajousConfig {
    /// End of the sampled parameter interval `[0, t_end]`.
    pub t_end: f64,
    /// Number of samples on the parameter grid.
    pub steps: usize,
    /// Raw slider range for both frequency multipliers.
    pub freq_range: RangeInclusive<i32>,
    /// Raw slider range for the phase offset.
    pub phase_range: RangeInclusive<i32>,
    /// Divisor mapping raw slider integers to real values.
    pub scale: f64,
    pub initial_freq1: i32,
    pub initial_freq2: i32,
    pub initial_phase: i32,
}

impl Default for LissajousConfig {
    fn default() -> Self {
        Self {
            t_end: 50.0 * std::f64::consts::PI,
            steps: 2000,
            freq_range: 0..=1000,
            phase_range: 0..=628,
            scale: 100.0,
            initial_freq1: 100,
            initial_freq2: 100,
            initial_phase: 0,
        }
    }
}

impl LissajousConfig {
    pub fn freq1_param(&self) -> SliderParam {
        SliderParam::new("a", self.freq_range.clone(), self.scale, self.initial_freq1)
    }

    pub fn freq2_param(&self) -> SliderParam {
        SliderParam::new("b", self.freq_range.clone(), self.scale, self.initial_freq2)
    }

    pub fn phase_param(&self) -> SliderParam {
        SliderParam::new("δ", self.phase_range.clone(), self.scale, self.initial_phase)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Van der Pol oscillator viewer
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct VanDerPolConfig {
    /// Integration interval is `[0, t_end]`.
    pub t_end: f64,
    /// Number of display samples taken from the dense solution.
    pub samples: usize,
    /// Initial condition `(x(0), x'(0))`.
    pub y0: [f64; 2],
    /// Raw slider range for the damping parameter μ.
    pub mu_range: RangeInclusive<i32>,
    /// Divisor mapping the raw slider integer to μ.
    pub mu_scale: f64,
    pub initial_mu: i32,
    /// Integrator tolerances.
    pub tolerances: Tolerances,
}

impl Default for VanDerPolConfig {
    fn default() -> Self {
        Self {
            t_end: 25.0,
            samples: 500,
            y0: [2.0, 0.0],
            mu_range: 0..=100,
            mu_scale: 10.0,
            initial_mu: 0,
            tolerances: Tolerances::default(),
        }
    }
}

impl VanDerPolConfig {
    pub fn mu_param(&self) -> SliderParam {
        SliderParam::new("μ", self.mu_range.clone(), self.mu_scale, self.initial_mu)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rosenbrock minimization visualizer
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct RosenbrockConfig {
    /// Square plotting window `[lo, hi]²` shared by contour grid and axes.
    pub extent: (f64, f64),
    /// Grid points per axis for the contour map.
    pub resolution: usize,
    /// Number of contour levels.
    pub levels: usize,
    /// Termination tolerance handed to every method.
    pub tol: f64,
    /// Iteration cap; `None` uses each method's own default.
    pub max_iter: Option<usize>,
    /// Method selected when the window opens.
    pub default_method: Method,
}

impl Default for RosenbrockConfig {
    fn default() -> Self {
        Self {
            extent: (-4.0, 4.0),
            resolution: 400,
            levels: 80,
            tol: 1e-6,
            max_iter: None,
            default_method: Method::NelderMead,
        }
    }
}
