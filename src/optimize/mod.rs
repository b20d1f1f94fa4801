//! Unconstrained minimization with a menu of named methods.
//!
//! [`minimize`] dispatches on [`Method`]. Every method receives the full
//! [`Objective`] (value, gradient and Hessian) and a per-iteration callback;
//! methods that do not need derivatives never call them.

mod bfgs;
mod cg;
mod lbfgs;
mod line_search;
mod nelder_mead;
mod newton_cg;
mod powell;
mod scalar;
mod trust_region;

use std::cell::Cell;
use std::fmt;

use nalgebra::{DMatrix, DVector};
use thiserror::Error;

/// A twice-differentiable scalar function of a vector.
pub trait Objective {
    fn value(&self, x: &DVector<f64>) -> f64;
    fn gradient(&self, x: &DVector<f64>) -> DVector<f64>;
    fn hessian(&self, x: &DVector<f64>) -> DMatrix<f64>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    NelderMead,
    Powell,
    Cg,
    Bfgs,
    NewtonCg,
    LBfgs,
    Dogleg,
    TrustNcg,
    TrustExact,
}

impl Method {
    pub fn all() -> &'static [Method] {
        &[
            Method::NelderMead,
            Method::Powell,
            Method::Cg,
            Method::Bfgs,
            Method::NewtonCg,
            Method::LBfgs,
            Method::Dogleg,
            Method::TrustNcg,
            Method::TrustExact,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Method::NelderMead => "Nelder-Mead",
            Method::Powell => "Powell",
            Method::Cg => "CG",
            Method::Bfgs => "BFGS",
            Method::NewtonCg => "Newton-CG",
            Method::LBfgs => "L-BFGS",
            Method::Dogleg => "dogleg",
            Method::TrustNcg => "trust-ncg",
            Method::TrustExact => "trust-exact",
        }
    }

    pub fn uses_gradient(&self) -> bool {
        !matches!(self, Method::NelderMead | Method::Powell)
    }

    pub fn uses_hessian(&self) -> bool {
        matches!(
            self,
            Method::NewtonCg | Method::Dogleg | Method::TrustNcg | Method::TrustExact
        )
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum OptimizeError {
    #[error("Hessian is not positive definite; {0} requires a convex model")]
    HessianNotPositiveDefinite(&'static str),

    #[error("objective is not finite at the starting point")]
    NonFiniteStart,
}

#[derive(Clone, Debug)]
pub struct MinimizeOptions {
    /// Termination tolerance; each method maps it onto its own criterion.
    pub tol: f64,
    /// Iteration cap; `None` uses the method's default.
    pub max_iter: Option<usize>,
}

impl Default for MinimizeOptions {
    fn default() -> Self {
        Self {
            tol: 1e-6,
            max_iter: None,
        }
    }
}

impl MinimizeOptions {
    pub(crate) fn max_iter_or(&self, default: usize) -> usize {
        self.max_iter.unwrap_or(default)
    }
}

#[derive(Clone, Debug)]
pub struct OptimizeResult {
    pub x: DVector<f64>,
    pub fun: f64,
    /// Completed iterations; equals the number of callback invocations.
    pub nit: usize,
    pub nfev: usize,
    pub njev: usize,
    pub nhev: usize,
    pub success: bool,
    pub message: String,
}

/// Objective wrapper counting evaluations.
pub(crate) struct Counted<'a, O: ?Sized> {
    inner: &'a O,
    nfev: Cell<usize>,
    njev: Cell<usize>,
    nhev: Cell<usize>,
}

impl<'a, O: Objective + ?Sized> Counted<'a, O> {
    fn new(inner: &'a O) -> Self {
        Self {
            inner,
            nfev: Cell::new(0),
            njev: Cell::new(0),
            nhev: Cell::new(0),
        }
    }

    pub(crate) fn value(&self, x: &DVector<f64>) -> f64 {
        self.nfev.set(self.nfev.get() + 1);
        self.inner.value(x)
    }

    pub(crate) fn gradient(&self, x: &DVector<f64>) -> DVector<f64> {
        self.njev.set(self.njev.get() + 1);
        self.inner.gradient(x)
    }

    pub(crate) fn hessian(&self, x: &DVector<f64>) -> DMatrix<f64> {
        self.nhev.set(self.nhev.get() + 1);
        self.inner.hessian(x)
    }

    pub(crate) fn nfev(&self) -> usize {
        self.nfev.get()
    }

    pub(crate) fn finish(
        &self,
        x: DVector<f64>,
        fun: f64,
        nit: usize,
        success: bool,
        message: impl Into<String>,
    ) -> OptimizeResult {
        OptimizeResult {
            x,
            fun,
            nit,
            nfev: self.nfev.get(),
            njev: self.njev.get(),
            nhev: self.nhev.get(),
            success,
            message: message.into(),
        }
    }
}

pub(crate) const MSG_CONVERGED: &str = "Optimization terminated successfully.";
pub(crate) const MSG_MAXITER: &str = "Maximum number of iterations has been exceeded.";
pub(crate) const MSG_MAXFEV: &str = "Maximum number of function evaluations has been exceeded.";
pub(crate) const MSG_PRECISION: &str =
    "Desired error not necessarily achieved due to precision loss.";

pub(crate) fn inf_norm(v: &DVector<f64>) -> f64 {
    v.amax()
}

/// Minimize `objective` from `x0` with `method`.
///
/// `callback` is invoked once after every completed iteration with the
/// method's current estimate.
pub fn minimize<O, F>(
    objective: &O,
    x0: &[f64],
    method: Method,
    opts: &MinimizeOptions,
    mut callback: F,
) -> Result<OptimizeResult, OptimizeError>
where
    O: Objective + ?Sized,
    F: FnMut(&DVector<f64>),
{
    let x0 = DVector::from_column_slice(x0);
    let obj = Counted::new(objective);
    let cb: &mut dyn FnMut(&DVector<f64>) = &mut callback;
    match method {
        Method::NelderMead => nelder_mead::minimize(&obj, x0, opts, cb),
        Method::Powell => powell::minimize(&obj, x0, opts, cb),
        Method::Cg => cg::minimize(&obj, x0, opts, cb),
        Method::Bfgs => bfgs::minimize(&obj, x0, opts, cb),
        Method::NewtonCg => newton_cg::minimize(&obj, x0, opts, cb),
        Method::LBfgs => lbfgs::minimize(&obj, x0, opts, cb),
        Method::Dogleg => trust_region::minimize(&obj, x0, opts, trust_region::Subproblem::Dogleg, cb),
        Method::TrustNcg => {
            trust_region::minimize(&obj, x0, opts, trust_region::Subproblem::Steihaug, cb)
        }
        Method::TrustExact => {
            trust_region::minimize(&obj, x0, opts, trust_region::Subproblem::Exact, cb)
        }
    }
}
