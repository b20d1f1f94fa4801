//! Trust-region driver and its three subproblem solvers.

use nalgebra::{DMatrix, DVector};

use super::{
    Counted, MinimizeOptions, Objective, OptimizeError, OptimizeResult, MSG_CONVERGED,
    MSG_MAXITER, MSG_PRECISION,
};

const INITIAL_RADIUS: f64 = 1.0;
const MAX_RADIUS: f64 = 1000.0;
const ETA: f64 = 0.15;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(super) enum Subproblem {
    Dogleg,
    Steihaug,
    Exact,
}

/// Quadratic model `m(p) = f + gᵀp + ½ pᵀBp` around the current iterate.
struct Model {
    x: DVector<f64>,
    f: f64,
    g: DVector<f64>,
    b: DMatrix<f64>,
}

impl Model {
    fn at<O: Objective + ?Sized>(obj: &Counted<'_, O>, x: DVector<f64>) -> Self {
        let f = obj.value(&x);
        let g = obj.gradient(&x);
        let b = obj.hessian(&x);
        Self { x, f, g, b }
    }

    fn predict(&self, p: &DVector<f64>) -> f64 {
        self.f + self.g.dot(p) + 0.5 * p.dot(&(&self.b * p))
    }

    fn jac_mag(&self) -> f64 {
        self.g.norm()
    }

    fn solve(&self, kind: Subproblem, radius: f64) -> Result<(DVector<f64>, bool), OptimizeError> {
        match kind {
            Subproblem::Dogleg => dogleg(&self.g, &self.b, radius),
            Subproblem::Steihaug => Ok(steihaug(self, radius)),
            Subproblem::Exact => Ok(exact(&self.g, &self.b, radius)),
        }
    }
}

/// Both `t` with `‖z + t·d‖ = radius`, in ascending order.
fn boundary_intersections(z: &DVector<f64>, d: &DVector<f64>, radius: f64) -> (f64, f64) {
    let a = d.dot(d);
    let b = 2.0 * z.dot(d);
    let c = z.dot(z) - radius * radius;
    let sqrt_disc = (b * b - 4.0 * a * c).max(0.0).sqrt();
    let aux = b + sqrt_disc.copysign(b);
    let ta = -aux / (2.0 * a);
    let tb = -2.0 * c / aux;
    if ta <= tb {
        (ta, tb)
    } else {
        (tb, ta)
    }
}

fn dogleg(
    g: &DVector<f64>,
    b: &DMatrix<f64>,
    radius: f64,
) -> Result<(DVector<f64>, bool), OptimizeError> {
    let chol = b
        .clone()
        .cholesky()
        .ok_or(OptimizeError::HessianNotPositiveDefinite("dogleg"))?;
    let p_best = -chol.solve(g);
    if p_best.norm() < radius {
        return Ok((p_best, false));
    }

    let bg = b * g;
    let p_u = -g * (g.dot(g) / g.dot(&bg));
    let p_u_norm = p_u.norm();
    if p_u_norm >= radius {
        return Ok((p_u * (radius / p_u_norm), true));
    }

    let d = &p_best - &p_u;
    let (_, tb) = boundary_intersections(&p_u, &d, radius);
    Ok((p_u + d * tb, true))
}

/// Steihaug–Toint truncated conjugate gradient.
fn steihaug(m: &Model, radius: f64) -> (DVector<f64>, bool) {
    let n = m.g.len();
    let mut z = DVector::<f64>::zeros(n);
    let jac_mag = m.jac_mag();
    let tolerance = 0.5_f64.min(jac_mag.sqrt()) * jac_mag;
    if jac_mag < tolerance {
        return (z, false);
    }

    let mut r = m.g.clone();
    let mut d = -&r;
    loop {
        let bd = &m.b * &d;
        let dbd = d.dot(&bd);
        if dbd <= 0.0 {
            let (ta, tb) = boundary_intersections(&z, &d, radius);
            let pa = &z + &d * ta;
            let pb = &z + &d * tb;
            return if m.predict(&pa) < m.predict(&pb) {
                (pa, true)
            } else {
                (pb, true)
            };
        }
        let r_sq = r.dot(&r);
        let alpha = r_sq / dbd;
        let z_next = &z + &d * alpha;
        if z_next.norm() >= radius {
            let (_, tb) = boundary_intersections(&z, &d, radius);
            return (&z + &d * tb, true);
        }
        let r_next = &r + &bd * alpha;
        let r_next_sq = r_next.dot(&r_next);
        if r_next_sq.sqrt() < tolerance {
            return (z_next, false);
        }
        let beta = r_next_sq / r_sq;
        d = -&r_next + &d * beta;
        z = z_next;
        r = r_next;
    }
}

/// Nearly exact solution of the trust-region subproblem via the eigen-decomposition of `B`.
fn exact(g: &DVector<f64>, b: &DMatrix<f64>, radius: f64) -> (DVector<f64>, bool) {
    let eig = b.clone().symmetric_eigen();
    let q = &eig.eigenvectors;
    let lam = &eig.eigenvalues;
    let gt = q.transpose() * g;
    let n = g.len();

    let (imin, lam_min) = lam
        .iter()
        .copied()
        .enumerate()
        .fold((0, f64::INFINITY), |acc, (i, l)| if l < acc.1 { (i, l) } else { acc });

    // step in the eigenbasis for shift `mu`, skipping components with zero denominator
    let step_norm = |mu: f64| -> f64 {
        (0..n)
            .map(|i| {
                let den = lam[i] + mu;
                if den == 0.0 {
                    0.0
                } else {
                    (gt[i] / den).powi(2)
                }
            })
            .sum::<f64>()
            .sqrt()
    };
    let step_for = |mu: f64| -> DVector<f64> {
        let coeffs = DVector::from_fn(n, |i, _| {
            let den = lam[i] + mu;
            if den == 0.0 {
                0.0
            } else {
                -gt[i] / den
            }
        });
        q * coeffs
    };

    if lam_min > 0.0 && step_norm(0.0) <= radius {
        return (step_for(0.0), false);
    }

    let mu_lo = (-lam_min).max(0.0);
    let gnorm = g.norm();
    let degenerate = gt[imin].abs() <= 1e-12 * gnorm.max(1.0);

    if degenerate && mu_lo > 0.0 {
        // hard case: move to the boundary along the lowest eigenvector
        let base = DVector::from_fn(n, |i, _| {
            let den = lam[i] + mu_lo;
            if den.abs() <= 1e-14 * lam_min.abs().max(1.0) {
                0.0
            } else {
                -gt[i] / den
            }
        });
        let base_norm = base.norm();
        if base_norm <= radius {
            let tau = (radius * radius - base_norm * base_norm).max(0.0).sqrt();
            let mut coeffs = base;
            coeffs[imin] += tau;
            return (q * coeffs, true);
        }
    }

    let mut lo = mu_lo;
    let mut hi = mu_lo + (gnorm / radius).max(1.0);
    while step_norm(hi) > radius {
        hi = mu_lo + 2.0 * (hi - mu_lo);
    }
    for _ in 0..200 {
        let mid = 0.5 * (lo + hi);
        if mid <= lo || mid >= hi {
            break;
        }
        if step_norm(mid) > radius {
            lo = mid;
        } else {
            hi = mid;
        }
        if (hi - lo) <= 1e-12 * hi.max(1.0) {
            break;
        }
    }
    (step_for(hi), true)
}

pub(super) fn minimize<O: Objective + ?Sized>(
    obj: &Counted<'_, O>,
    x0: DVector<f64>,
    opts: &MinimizeOptions,
    kind: Subproblem,
    callback: &mut dyn FnMut(&DVector<f64>),
) -> Result<OptimizeResult, OptimizeError> {
    let n = x0.len();
    let max_iter = opts.max_iter_or(200 * n);
    let gtol = opts.tol;

    let mut m = Model::at(obj, x0);
    if !m.f.is_finite() {
        return Err(OptimizeError::NonFiniteStart);
    }
    let mut radius = INITIAL_RADIUS;
    let mut nit = 0usize;
    let mut message = MSG_CONVERGED;

    while m.jac_mag() >= gtol {
        let (p, hits_boundary) = m.solve(kind, radius)?;
        let predicted = m.predict(&p);
        let proposed = Model::at(obj, &m.x + &p);

        let actual_reduction = m.f - proposed.f;
        let predicted_reduction = m.f - predicted;
        if predicted_reduction <= 0.0 {
            message = MSG_PRECISION;
            break;
        }
        let rho = actual_reduction / predicted_reduction;
        if rho < 0.25 {
            radius *= 0.25;
        } else if rho > 0.75 && hits_boundary {
            radius = (2.0 * radius).min(MAX_RADIUS);
        }
        if rho > ETA {
            m = proposed;
        }

        nit += 1;
        callback(&m.x);

        if m.jac_mag() < gtol {
            break;
        }
        if nit >= max_iter {
            message = MSG_MAXITER;
            break;
        }
    }

    let success = message == MSG_CONVERGED;
    Ok(obj.finish(m.x, m.f, nit, success, message))
}
