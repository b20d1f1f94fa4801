//! Nonlinear conjugate gradient (Polak–Ribière with restarts).

use nalgebra::DVector;

use super::line_search::{initial_alpha, strong_wolfe};
use super::{
    inf_norm, Counted, MinimizeOptions, Objective, OptimizeError, OptimizeResult, MSG_CONVERGED,
    MSG_MAXITER, MSG_PRECISION,
};

pub(super) fn minimize<O: Objective + ?Sized>(
    obj: &Counted<'_, O>,
    x0: DVector<f64>,
    opts: &MinimizeOptions,
    callback: &mut dyn FnMut(&DVector<f64>),
) -> Result<OptimizeResult, OptimizeError> {
    let n = x0.len();
    let max_iter = opts.max_iter_or(200 * n);
    let gtol = opts.tol;

    let mut x = x0;
    let mut f = obj.value(&x);
    if !f.is_finite() {
        return Err(OptimizeError::NonFiniteStart);
    }
    let mut g = obj.gradient(&x);
    let mut f_prev = f + g.norm() / 2.0;
    let mut p = -&g;
    let mut nit = 0usize;
    let mut message = MSG_CONVERGED;

    while inf_norm(&g) > gtol {
        if nit >= max_iter {
            message = MSG_MAXITER;
            break;
        }
        let dphi0 = g.dot(&p);
        let alpha0 = initial_alpha(f, f_prev, dphi0);
        let Some(step) = strong_wolfe(obj, &x, &p, f, &g, alpha0, 1e-4, 0.4) else {
            message = MSG_PRECISION;
            break;
        };

        let delta = g.dot(&g);
        let y = &step.g - &g;
        let beta = (y.dot(&step.g) / delta).max(0.0);
        let mut p_next = -&step.g + &p * beta;
        if p_next.dot(&step.g) >= 0.0 {
            p_next = -&step.g;
        }

        f_prev = f;
        x = step.x;
        f = step.f;
        g = step.g;
        p = p_next;
        nit += 1;
        callback(&x);
    }

    Ok(obj.finish(x, f, nit, message == MSG_CONVERGED, message))
}
