use nalgebra::{DMatrix, DVector};

use super::scalar::{bracket, brent};
use super::{
    Counted, MinimizeOptions, Objective, OptimizeError, OptimizeResult, MSG_CONVERGED, MSG_MAXFEV,
    MSG_MAXITER,
};

/// Minimize along `direction` from `x`; returns the new point, its value and the step taken.
fn line_minimize<O: Objective + ?Sized>(
    obj: &Counted<'_, O>,
    x: &DVector<f64>,
    fx: f64,
    direction: &DVector<f64>,
    tol: f64,
) -> (DVector<f64>, f64, DVector<f64>) {
    let mut phi = |alpha: f64| obj.value(&(x + direction * alpha));
    let Some(br) = bracket(&mut phi, 0.0, 1.0) else {
        return (x.clone(), fx, DVector::zeros(x.len()));
    };
    let (alpha, f_min) = brent(&mut phi, br, tol);
    if f_min > fx {
        return (x.clone(), fx, DVector::zeros(x.len()));
    }
    let step = direction * alpha;
    (x + &step, f_min, step)
}

pub(super) fn minimize<O: Objective + ?Sized>(
    obj: &Counted<'_, O>,
    x0: DVector<f64>,
    opts: &MinimizeOptions,
    callback: &mut dyn FnMut(&DVector<f64>),
) -> Result<OptimizeResult, OptimizeError> {
    let n = x0.len();
    let max_iter = opts.max_iter_or(1000 * n);
    let max_fev = 1000 * n;
    let (xtol, ftol) = (opts.tol, opts.tol);

    let mut direc = DMatrix::<f64>::identity(n, n);
    let mut x = x0;
    let mut fval = obj.value(&x);
    if !fval.is_finite() {
        return Err(OptimizeError::NonFiniteStart);
    }
    let mut x1 = x.clone();
    let mut nit = 0usize;
    let message;

    loop {
        let fx = fval;
        let mut bigind = 0;
        let mut delta = 0.0;
        for i in 0..n {
            let d = direc.column(i).into_owned();
            let fx2 = fval;
            let (xn, fn_, _) = line_minimize(obj, &x, fval, &d, xtol * 100.0);
            x = xn;
            fval = fn_;
            if fx2 - fval > delta {
                delta = fx2 - fval;
                bigind = i;
            }
        }
        nit += 1;
        callback(&x);

        let bnd = ftol * (fx.abs() + fval.abs()) + 1e-20;
        if 2.0 * (fx - fval) <= bnd {
            message = MSG_CONVERGED;
            break;
        }
        if obj.nfev() >= max_fev {
            message = MSG_MAXFEV;
            break;
        }
        if nit >= max_iter {
            message = MSG_MAXITER;
            break;
        }

        // extrapolated point along the net displacement of this sweep
        let direc1 = &x - &x1;
        x1 = x.clone();
        let x2 = &x + &direc1;
        let fx2 = obj.value(&x2);

        if fx > fx2 {
            let mut t = 2.0 * (fx + fx2 - 2.0 * fval);
            let temp = fx - fval - delta;
            t *= temp * temp;
            let temp = fx - fx2;
            t -= delta * temp * temp;
            if t < 0.0 {
                let (xn, fn_, step) = line_minimize(obj, &x, fval, &direc1, xtol * 100.0);
                x = xn;
                fval = fn_;
                if step.iter().any(|v| *v != 0.0) {
                    let last = direc.column(n - 1).into_owned();
                    direc.set_column(bigind, &last);
                    direc.set_column(n - 1, &step);
                }
            }
        }
    }

    Ok(obj.finish(x, fval, nit, message == MSG_CONVERGED, message))
}
