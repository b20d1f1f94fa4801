use nalgebra::DVector;

use super::{
    Counted, MinimizeOptions, Objective, OptimizeError, OptimizeResult, MSG_CONVERGED, MSG_MAXFEV,
    MSG_MAXITER,
};

const RHO: f64 = 1.0;
const CHI: f64 = 2.0;
const PSI: f64 = 0.5;
const SIGMA: f64 = 0.5;
const NONZDELT: f64 = 0.05;
const ZDELT: f64 = 0.00025;

pub(super) fn minimize<O: Objective + ?Sized>(
    obj: &Counted<'_, O>,
    x0: DVector<f64>,
    opts: &MinimizeOptions,
    callback: &mut dyn FnMut(&DVector<f64>),
) -> Result<OptimizeResult, OptimizeError> {
    let n = x0.len();
    let max_iter = opts.max_iter_or(200 * n);
    let max_fev = 200 * n;
    let (xatol, fatol) = (opts.tol, opts.tol);

    let mut sim: Vec<DVector<f64>> = Vec::with_capacity(n + 1);
    sim.push(x0.clone());
    for k in 0..n {
        let mut y = x0.clone();
        y[k] = if y[k] != 0.0 { (1.0 + NONZDELT) * y[k] } else { ZDELT };
        sim.push(y);
    }
    let mut fsim: Vec<f64> = sim.iter().map(|x| obj.value(x)).collect();
    if !fsim[0].is_finite() {
        return Err(OptimizeError::NonFiniteStart);
    }
    sort_simplex(&mut sim, &mut fsim);

    let mut nit = 0usize;
    let mut message = MSG_CONVERGED;
    loop {
        if obj.nfev() >= max_fev {
            message = MSG_MAXFEV;
            break;
        }
        if nit >= max_iter {
            message = MSG_MAXITER;
            break;
        }
        let x_spread = sim[1..]
            .iter()
            .map(|v| (v - &sim[0]).amax())
            .fold(0.0, f64::max);
        let f_spread = fsim[1..]
            .iter()
            .map(|f| (fsim[0] - f).abs())
            .fold(0.0, f64::max);
        if x_spread <= xatol && f_spread <= fatol {
            break;
        }

        let worst = n;
        let xbar = sim[..n]
            .iter()
            .fold(DVector::zeros(n), |acc, v| acc + v)
            / n as f64;
        let xr = &xbar * (1.0 + RHO) - &sim[worst] * RHO;
        let fxr = obj.value(&xr);

        let mut shrink = false;
        if fxr < fsim[0] {
            let xe = &xbar * (1.0 + RHO * CHI) - &sim[worst] * (RHO * CHI);
            let fxe = obj.value(&xe);
            if fxe < fxr {
                sim[worst] = xe;
                fsim[worst] = fxe;
            } else {
                sim[worst] = xr;
                fsim[worst] = fxr;
            }
        } else if fxr < fsim[n - 1] {
            sim[worst] = xr;
            fsim[worst] = fxr;
        } else if fxr < fsim[worst] {
            // outside contraction
            let xc = &xbar * (1.0 + PSI * RHO) - &sim[worst] * (PSI * RHO);
            let fxc = obj.value(&xc);
            if fxc <= fxr {
                sim[worst] = xc;
                fsim[worst] = fxc;
            } else {
                shrink = true;
            }
        } else {
            // inside contraction
            let xcc = &xbar * (1.0 - PSI) + &sim[worst] * PSI;
            let fxcc = obj.value(&xcc);
            if fxcc < fsim[worst] {
                sim[worst] = xcc;
                fsim[worst] = fxcc;
            } else {
                shrink = true;
            }
        }

        if shrink {
            let best = sim[0].clone();
            for j in 1..=n {
                sim[j] = &best + (&sim[j] - &best) * SIGMA;
                fsim[j] = obj.value(&sim[j]);
            }
        }

        sort_simplex(&mut sim, &mut fsim);
        nit += 1;
        callback(&sim[0]);
    }

    let success = message == MSG_CONVERGED;
    Ok(obj.finish(sim[0].clone(), fsim[0], nit, success, message))
}

/// Reorder vertices by ascending function value (stable, like argsort).
fn sort_simplex(sim: &mut Vec<DVector<f64>>, fsim: &mut Vec<f64>) {
    let mut idx: Vec<usize> = (0..fsim.len()).collect();
    idx.sort_by(|&a, &b| fsim[a].total_cmp(&fsim[b]));
    let new_sim = idx.iter().map(|&i| sim[i].clone()).collect();
    let new_f = idx.iter().map(|&i| fsim[i]).collect();
    *sim = new_sim;
    *fsim = new_f;
}
