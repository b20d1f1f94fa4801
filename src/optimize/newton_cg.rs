//! Line-search Newton method with a truncated CG inner solve.

use nalgebra::{DMatrix, DVector};

use super::line_search::strong_wolfe;
use super::{
    inf_norm, Counted, MinimizeOptions, Objective, OptimizeError, OptimizeResult, MSG_CONVERGED,
    MSG_MAXITER, MSG_PRECISION,
};

/// Approximately solve `H p = -g`, stopping early on negative curvature.
fn newton_direction(h: &DMatrix<f64>, g: &DVector<f64>) -> DVector<f64> {
    let n = g.len();
    let maggrad = g.abs().sum();
    let eta = 0.5_f64.min(maggrad.sqrt());
    let termcond = eta * maggrad;

    let mut xsupi = DVector::<f64>::zeros(n);
    let mut ri = g.clone();
    let mut psupi = -&ri;
    let mut dri0 = ri.dot(&ri);

    for i in 0..20 * n {
        if ri.abs().sum() <= termcond {
            break;
        }
        let ap = h * &psupi;
        let curv = psupi.dot(&ap);
        if (0.0..=3.0 * f64::EPSILON).contains(&curv) {
            break;
        } else if curv < 0.0 {
            if i == 0 {
                // steepest descent scaled by the curvature seen along it
                xsupi = -g * (dri0 / -curv);
            }
            break;
        }
        let alphai = dri0 / curv;
        xsupi += &psupi * alphai;
        ri += &ap * alphai;
        let dri1 = ri.dot(&ri);
        let betai = dri1 / dri0;
        psupi = -&ri + &psupi * betai;
        dri0 = dri1;
    }
    xsupi
}

pub(super) fn minimize<O: Objective + ?Sized>(
    obj: &Counted<'_, O>,
    x0: DVector<f64>,
    opts: &MinimizeOptions,
    callback: &mut dyn FnMut(&DVector<f64>),
) -> Result<OptimizeResult, OptimizeError> {
    let n = x0.len();
    let max_iter = opts.max_iter_or(200 * n);
    let xtol = n as f64 * opts.tol;

    let mut x = x0;
    let mut f = obj.value(&x);
    if !f.is_finite() {
        return Err(OptimizeError::NonFiniteStart);
    }
    let mut g = obj.gradient(&x);
    let mut nit = 0usize;
    let mut message = MSG_CONVERGED;

    if inf_norm(&g) <= opts.tol {
        return Ok(obj.finish(x, f, 0, true, message));
    }

    let mut update_size = 2.0 * xtol;
    while update_size > xtol {
        if nit >= max_iter {
            message = MSG_MAXITER;
            break;
        }
        let h = obj.hessian(&x);
        let p = newton_direction(&h, &g);
        let Some(step) = strong_wolfe(obj, &x, &p, f, &g, 1.0, 1e-4, 0.9) else {
            message = MSG_PRECISION;
            break;
        };

        update_size = (&step.x - &x).abs().sum();
        x = step.x;
        f = step.f;
        g = step.g;
        nit += 1;
        callback(&x);

        if inf_norm(&g) == 0.0 {
            break;
        }
    }

    Ok(obj.finish(x, f, nit, message == MSG_CONVERGED, message))
}
