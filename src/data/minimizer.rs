//! Minimizer visualizer state: contour map, method selection and the
//! double-click driven run that records the iteration path.

use egui::PointerButton;
use egui_plot::MarkerShape;
use tracing::{debug, info, warn};

use crate::config::RosenbrockConfig;
use crate::data::contour::{contour_map, jet, linear_levels, ContourLine, Grid};
use crate::data::plot_view::{AxisSettings, Pen, PlotView};
use crate::data::rosenbrock::Rosenbrock;
use crate::data::samples::linspace;
use crate::data::trace::IterationTrace;
use crate::error::Result;
use crate::optimize::{minimize, Method, MinimizeOptions};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
}

/// Outcome of one run, as shown in the status bar.
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    pub method: Method,
    pub x: f64,
    pub y: f64,
    pub fun: f64,
    pub nit: usize,
    pub success: bool,
    pub message: String,
}

impl RunReport {
    pub fn status_line(&self) -> String {
        format!(
            "Method: {}, Xmin = {:2.2}, Ymin = {:2.2}, f(x, y) = {:2.2}",
            self.method.name(),
            self.x,
            self.y,
            self.fun
        )
    }
}

pub struct MinimizerState {
    method: Method,
    opts: MinimizeOptions,
    contours: Vec<ContourLine>,
    z_range: (f64, f64),
    path: Option<IterationTrace>,
    last_report: Option<RunReport>,
    run_state: RunState,
    pub view: PlotView,
    pub path_pen: Pen,
}

impl MinimizerState {
    pub fn new(cfg: &RosenbrockConfig) -> Self {
        let (lo, hi) = cfg.extent;
        let axis = linspace(lo, hi, cfg.resolution);
        let grid = Grid::sample(axis.clone(), axis, Rosenbrock::value_at);
        let z_range = grid.z_range().unwrap_or((0.0, 1.0));
        let levels = linear_levels(z_range.0, z_range.1, cfg.levels);
        let contours = contour_map(&grid, &levels);
        debug!(
            lines = contours.len(),
            levels = levels.len(),
            "built Rosenbrock contour map"
        );

        let mut view = PlotView::new(
            "Rosenbrock function minimization.\nDouble click for initial point",
            AxisSettings::labeled("x").with_range(lo, hi),
            AxisSettings::labeled("y").with_range(lo, hi),
        );
        view.aspect_locked = true;
        view.show_grid = false;

        Self {
            method: cfg.default_method,
            opts: MinimizeOptions {
                tol: cfg.tol,
                max_iter: cfg.max_iter,
            },
            contours,
            z_range,
            path: None,
            last_report: None,
            run_state: RunState::Idle,
            view,
            path_pen: Pen::solid(egui::Color32::RED, 1.5).with_marker(
                MarkerShape::Circle,
                3.0,
                egui::Color32::BLACK,
            ),
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Dropdown handler.
    pub fn select_method(&mut self, method: Method) {
        if method != self.method {
            debug!(method = method.name(), "minimization method selected");
        }
        self.method = method;
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn contours(&self) -> &[ContourLine] {
        &self.contours
    }

    /// Color of a contour line according to its level.
    pub fn level_color(&self, level: f64) -> egui::Color32 {
        let (lo, hi) = self.z_range;
        let t = if hi > lo { (level - lo) / (hi - lo) } else { 0.0 };
        jet(t)
    }

    /// The path drawn on top of the contours, if any.
    pub fn path(&self) -> Option<&IterationTrace> {
        self.path.as_ref()
    }

    pub fn last_report(&self) -> Option<&RunReport> {
        self.last_report.as_ref()
    }

    /// Mouse handler. Only a primary-button double click starts a run;
    /// every other event is ignored and returns `None`.
    pub fn on_pointer(
        &mut self,
        button: PointerButton,
        double_click: bool,
        point: [f64; 2],
    ) -> Option<Result<RunReport>> {
        if button != PointerButton::Primary || !double_click {
            return None;
        }
        Some(self.run_from(point))
    }

    /// Run the selected method from `start`, replacing any previous path.
    pub fn run_from(&mut self, start: [f64; 2]) -> Result<RunReport> {
        self.path = None;
        self.last_report = None;
        self.run_state = RunState::Running;
        let mut trace = IterationTrace::seeded(start);

        let result = minimize(&Rosenbrock, &start, self.method, &self.opts, |xk| {
            trace.push([xk[0], xk[1]])
        });
        self.run_state = RunState::Idle;

        let res = match result {
            Ok(res) => res,
            Err(e) => {
                warn!(method = self.method.name(), error = %e, "minimization failed");
                return Err(e.into());
            }
        };
        if !res.success {
            warn!(method = self.method.name(), message = %res.message, "minimization did not converge");
        }

        let report = RunReport {
            method: self.method,
            x: res.x[0],
            y: res.x[1],
            fun: res.fun,
            nit: res.nit,
            success: res.success,
            message: res.message,
        };
        info!(
            method = report.method.name(),
            x0 = start[0],
            y0 = start[1],
            iterations = report.nit,
            points = trace.points().len(),
            "minimization finished"
        );
        self.path = Some(trace);
        self.last_report = Some(report.clone());
        Ok(report)
    }
}
