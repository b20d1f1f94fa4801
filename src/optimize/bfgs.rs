use nalgebra::{DMatrix, DVector};

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
    let eye = DMatrix::<f64>::identity(n, n);

    let mut x = x0;
    let mut f = obj.value(&x);
    if !f.is_finite() {
        return Err(OptimizeError::NonFiniteStart);
    }
    let mut g = obj.gradient(&x);
    let mut f_prev = f + g.norm() / 2.0;
    // inverse Hessian approximation
    let mut h = eye.clone();
    let mut nit = 0usize;
    let mut message = MSG_CONVERGED;

    while inf_norm(&g) > gtol {
        if nit >= max_iter {
            message = MSG_MAXITER;
            break;
        }
        let p = -(&h * &g);
        let alpha0 = initial_alpha(f, f_prev, g.dot(&p));
        let Some(step) = strong_wolfe(obj, &x, &p, f, &g, alpha0, 1e-4, 0.9) else {
            message = MSG_PRECISION;
            break;
        };

        let s = &step.x - &x;
        let y = &step.g - &g;
        f_prev = f;
        x = step.x;
        f = step.f;
        g = step.g;
        nit += 1;
        callback(&x);

        if inf_norm(&g) <= gtol || !f.is_finite() {
            break;
        }

        let ys = y.dot(&s);
        let rho = if ys == 0.0 { 1000.0 } else { 1.0 / ys };
        let a1 = &eye - &s * y.transpose() * rho;
        let a2 = &eye - &y * s.transpose() * rho;
        h = &a1 * &h * &a2 + &s * s.transpose() * rho;
    }

    Ok(obj.finish(x, f, nit, message == MSG_CONVERGED, message))
}
