//! Limited-memory BFGS (two-loop recursion, no bounds).

use std::collections::VecDeque;

use nalgebra::DVector;

use super::line_search::strong_wolfe;
use super::{
    inf_norm, Counted, MinimizeOptions, Objective, OptimizeError, OptimizeResult, MSG_CONVERGED,
    MSG_MAXITER, MSG_PRECISION,
};

const MEMORY: usize = 10;

struct Pair {
    s: DVector<f64>,
    y: DVector<f64>,
    rho: f64,
}

fn direction(g: &DVector<f64>, history: &VecDeque<Pair>) -> DVector<f64> {
    let mut q = g.clone();
    let mut alphas = Vec::with_capacity(history.len());
    for pair in history.iter().rev() {
        let a = pair.rho * pair.s.dot(&q);
        q -= &pair.y * a;
        alphas.push(a);
    }
    let gamma = history
        .back()
        .map(|p| p.s.dot(&p.y) / p.y.dot(&p.y))
        .unwrap_or(1.0);
    let mut r = q * gamma;
    for (pair, a) in history.iter().zip(alphas.iter().rev()) {
        let b = pair.rho * pair.y.dot(&r);
        r += &pair.s * (a - b);
    }
    -r
}

pub(super) fn minimize<O: Objective + ?Sized>(
    obj: &Counted<'_, O>,
    x0: DVector<f64>,
    opts: &MinimizeOptions,
    callback: &mut dyn FnMut(&DVector<f64>),
) -> Result<OptimizeResult, OptimizeError> {
    let max_iter = opts.max_iter_or(15_000);
    let (gtol, ftol) = (opts.tol, opts.tol);

    let mut x = x0;
    let mut f = obj.value(&x);
    if !f.is_finite() {
        return Err(OptimizeError::NonFiniteStart);
    }
    let mut g = obj.gradient(&x);
    let mut history: VecDeque<Pair> = VecDeque::with_capacity(MEMORY);
    let mut nit = 0usize;
    let mut message = MSG_CONVERGED;

    while inf_norm(&g) > gtol {
        if nit >= max_iter {
            message = MSG_MAXITER;
            break;
        }
        let p = direction(&g, &history);
        let alpha0 = if history.is_empty() {
            (1.0 / inf_norm(&g)).min(1.0)
        } else {
            1.0
        };
        let Some(step) = strong_wolfe(obj, &x, &p, f, &g, alpha0, 1e-3, 0.9) else {
            message = MSG_PRECISION;
            break;
        };

        let s = &step.x - &x;
        let y = &step.g - &g;
        let f_old = f;
        x = step.x;
        f = step.f;
        g = step.g;
        nit += 1;
        callback(&x);

        let ys = y.dot(&s);
        if ys > f64::EPSILON * y.norm_squared() {
            if history.len() == MEMORY {
                history.pop_front();
            }
            history.push_back(Pair { s, y, rho: 1.0 / ys });
        }

        let rel = (f_old - f) / f_old.abs().max(f.abs()).max(1.0);
        if rel <= ftol {
            break;
        }
    }

    Ok(obj.finish(x, f, nit, message == MSG_CONVERGED, message))
}
