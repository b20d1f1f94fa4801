//! Van der Pol oscillator viewer state.

use ivp::prelude::{solve_ivp, IVPOptions, ODE};
use tracing::{debug, error};

use crate::config::VanDerPolConfig;
use crate::data::parameter::{format_value, SliderParam};
use crate::data::plot_view::{AxisSettings, Pen, PlotView};
use crate::data::samples::{linspace, SampleBuffer};
use crate::error::{DemoError, Result};

/// `x'' = μ(1 − x²)x' − x` written as `u0' = u1`, `u1' = μ(1 − u0²)u1 − u0`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VanDerPol {
    pub mu: f64,
}

impl ODE for VanDerPol {
    fn ode(&self, _t: f64, y: &[f64], dydt: &mut [f64]) {
        dydt[0] = y[1];
        dydt[1] = self.mu * (1.0 - y[0] * y[0]) * y[1] - y[0];
    }
}

/// Relative and absolute error tolerances for the adaptive integrator.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tolerances {
    pub rtol: f64,
    pub atol: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            rtol: 1e-3,
            atol: 1e-6,
        }
    }
}

/// A planar system sampled on a time grid: `x` and `x'` at every `t`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trajectory {
    pub t: Vec<f64>,
    pub x: Vec<f64>,
    pub dx: Vec<f64>,
}

/// Integrate a two-state system over the span of `t_grid` and read the
/// dense solution back at every grid point.
///
/// The grid must be ascending with at least two distinct points; its first
/// and last entries are the integration bounds.
pub fn integrate<F: ODE>(
    system: &F,
    y0: [f64; 2],
    t_grid: Vec<f64>,
    tol: Tolerances,
) -> Result<Trajectory> {
    let (t0, t1) = match (t_grid.first(), t_grid.last()) {
        (Some(&t0), Some(&t1)) if t1 > t0 => (t0, t1),
        _ => {
            return Err(DemoError::Solver(format!(
                "time grid of {} points spans no interval",
                t_grid.len()
            )))
        }
    };

    let options = IVPOptions::builder()
        .rtol(tol.rtol)
        .atol(tol.atol)
        .dense_output(true)
        .build();
    let sol = solve_ivp(system, t0, t1, &y0, options)
        .map_err(|e| DemoError::Solver(format!("{e:?}")))?;
    debug!(status = ?sol.status, nfev = ?sol.nfev, "integration finished");

    let ys = sol.sol_many(&t_grid);
    let mut x = Vec::with_capacity(t_grid.len());
    let mut dx = Vec::with_capacity(t_grid.len());
    for (t, y) in t_grid.iter().zip(ys.iter()) {
        match y {
            Some(y) => {
                x.push(y[0]);
                dx.push(y[1]);
            }
            None => {
                return Err(DemoError::Solver(format!(
                    "no dense output at t = {t}"
                )))
            }
        }
    }
    Ok(Trajectory { t: t_grid, x, dx })
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// `t` against `x(t)`.
    #[default]
    TimeSeries,
    /// `x(t)` against `x'(t)`.
    PhasePortrait,
}

impl ViewMode {
    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::TimeSeries => "x(t)",
            ViewMode::PhasePortrait => "Phase portrait",
        }
    }

    fn axis_labels(&self) -> (&'static str, &'static str) {
        match self {
            ViewMode::TimeSeries => ("t", "x(t)"),
            ViewMode::PhasePortrait => ("x(t)", "x'(t)"),
        }
    }
}

pub fn title_for(mu: f64) -> String {
    format!("Van der Pol oscillator ODE solution for μ = {}", format_value(mu))
}

pub struct OscillatorState {
    pub mu: SliderParam,
    mode: ViewMode,
    y0: [f64; 2],
    t: Vec<f64>,
    tol: Tolerances,
    trajectory: Trajectory,
    buffer: SampleBuffer,
    pub view: PlotView,
}

impl OscillatorState {
    /// Build the viewer and run the first solve.
    pub fn new(cfg: &VanDerPolConfig) -> Result<Self> {
        let mut view = PlotView::new(String::new(), AxisSettings::default(), AxisSettings::default());
        view.pen = Pen::solid(egui::Color32::RED, 3.0);

        let mut state = Self {
            mu: cfg.mu_param(),
            mode: ViewMode::default(),
            y0: cfg.y0,
            t: linspace(0.0, cfg.t_end, cfg.samples),
            tol: cfg.tolerances,
            trajectory: Trajectory::default(),
            buffer: SampleBuffer::default(),
            view,
        };
        state.refresh()?;
        Ok(state)
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn mu_value(&self) -> f64 {
        self.mu.value()
    }

    /// Slider handler.
    pub fn set_mu_raw(&mut self, raw: i32) -> Result<()> {
        self.mu.set_raw(raw);
        self.refresh()
    }

    /// Mode toggle handler. Re-solves with the current μ.
    pub fn set_mode(&mut self, mode: ViewMode) -> Result<()> {
        self.mode = mode;
        self.refresh()
    }

    pub fn export_file_name(&self) -> String {
        format!("VdP plot mu = {}.png", format_value(self.mu.value()))
    }

    /// Samples currently displayed, in the active projection.
    pub fn buffer(&self) -> &SampleBuffer {
        &self.buffer
    }

    /// The last solve, sampled on the display grid.
    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Both projections of the current solution: `(t, x)` and `(x, x')`.
    pub fn projections(&self) -> (SampleBuffer, SampleBuffer) {
        let tr = &self.trajectory;
        (
            SampleBuffer::new(tr.t.clone(), tr.x.clone()),
            SampleBuffer::new(tr.x.clone(), tr.dx.clone()),
        )
    }

    fn refresh(&mut self) -> Result<()> {
        let mu = self.mu.value();
        debug!(mu, mode = ?self.mode, "solving Van der Pol oscillator");
        let system = VanDerPol { mu };
        self.trajectory = match integrate(&system, self.y0, self.t.clone(), self.tol) {
            Ok(tr) => tr,
            Err(e) => {
                error!(mu, error = %e, "Van der Pol solve failed");
                return Err(e);
            }
        };

        let (series, portrait) = self.projections();
        self.buffer = match self.mode {
            ViewMode::TimeSeries => series,
            ViewMode::PhasePortrait => portrait,
        };

        let (xl, yl) = self.mode.axis_labels();
        self.view.set_labels(xl, yl);
        self.view.aspect_locked = self.mode == ViewMode::PhasePortrait;
        self.view.title = title_for(mu);
        self.view.request_fit();
        Ok(())
    }
}
