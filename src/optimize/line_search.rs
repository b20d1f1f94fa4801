//! Strong Wolfe line search (bracketing followed by zoom).

use nalgebra::DVector;

use super::{Counted, Objective};

const MAX_BRACKET: usize = 30;
const MAX_ZOOM: usize = 40;
const ALPHA_MAX: f64 = 1e10;

pub(crate) struct Step {
    pub alpha: f64,
    pub x: DVector<f64>,
    pub f: f64,
    pub g: DVector<f64>,
}

/// Initial trial step, using the previous decrease as a scale estimate.
pub(crate) fn initial_alpha(f0: f64, f_prev: f64, dphi0: f64) -> f64 {
    if dphi0 != 0.0 && f_prev.is_finite() {
        let a = 1.01 * 2.0 * (f0 - f_prev) / dphi0;
        if a > 0.0 && a.is_finite() {
            return a.min(1.0);
        }
    }
    1.0
}

struct Point {
    alpha: f64,
    phi: f64,
    dphi: f64,
}

/// Search along `p` from `x` for a step satisfying the strong Wolfe conditions.
/// Returns `None` when `p` is not a descent direction or no acceptable step is found.
#[allow(clippy::too_many_arguments)]
pub(crate) fn strong_wolfe<O: Objective + ?Sized>(
    obj: &Counted<'_, O>,
    x: &DVector<f64>,
    p: &DVector<f64>,
    f0: f64,
    g0: &DVector<f64>,
    alpha0: f64,
    c1: f64,
    c2: f64,
) -> Option<Step> {
    let dphi0 = g0.dot(p);
    if !(dphi0 < 0.0) {
        return None;
    }

    let eval = |alpha: f64| {
        let xa = x + p * alpha;
        let phi = obj.value(&xa);
        (xa, phi)
    };

    let mut prev = Point {
        alpha: 0.0,
        phi: f0,
        dphi: dphi0,
    };
    let mut alpha = alpha0.min(ALPHA_MAX);

    for i in 0..MAX_BRACKET {
        let (xa, phi) = eval(alpha);
        if !phi.is_finite() {
            alpha = 0.5 * (prev.alpha + alpha);
            continue;
        }
        if phi > f0 + c1 * alpha * dphi0 || (i > 0 && phi >= prev.phi) {
            let hi = Point {
                alpha,
                phi,
                dphi: f64::NAN,
            };
            return zoom(obj, x, p, f0, dphi0, prev, hi, c1, c2);
        }
        let g = obj.gradient(&xa);
        let dphi = g.dot(p);
        if dphi.abs() <= -c2 * dphi0 {
            return Some(Step {
                alpha,
                x: xa,
                f: phi,
                g,
            });
        }
        let cur = Point { alpha, phi, dphi };
        if dphi >= 0.0 {
            return zoom(obj, x, p, f0, dphi0, cur, prev, c1, c2);
        }
        prev = cur;
        alpha = (2.0 * alpha).min(ALPHA_MAX);
    }
    None
}

#[allow(clippy::too_many_arguments)]
fn zoom<O: Objective + ?Sized>(
    obj: &Counted<'_, O>,
    x: &DVector<f64>,
    p: &DVector<f64>,
    f0: f64,
    dphi0: f64,
    mut lo: Point,
    mut hi: Point,
    c1: f64,
    c2: f64,
) -> Option<Step> {
    for _ in 0..MAX_ZOOM {
        let d = hi.alpha - lo.alpha;
        // minimizer of the quadratic through phi(lo), phi'(lo), phi(hi)
        let curv = hi.phi - lo.phi - lo.dphi * d;
        let mut alpha = if curv > 0.0 {
            lo.alpha - lo.dphi * d * d / (2.0 * curv)
        } else {
            f64::NAN
        };
        let (a, b) = if lo.alpha < hi.alpha {
            (lo.alpha, hi.alpha)
        } else {
            (hi.alpha, lo.alpha)
        };
        let margin = 0.1 * (b - a);
        if !(alpha > a + margin && alpha < b - margin) {
            alpha = 0.5 * (a + b);
        }
        if (b - a).abs() < f64::EPSILON * b.abs().max(1.0) {
            break;
        }

        let xa = x + p * alpha;
        let phi = obj.value(&xa);
        if !phi.is_finite() || phi > f0 + c1 * alpha * dphi0 || phi >= lo.phi {
            hi = Point {
                alpha,
                phi,
                dphi: f64::NAN,
            };
            continue;
        }
        let g = obj.gradient(&xa);
        let dphi = g.dot(p);
        if dphi.abs() <= -c2 * dphi0 {
            return Some(Step {
                alpha,
                x: xa,
                f: phi,
                g,
            });
        }
        if dphi * (hi.alpha - lo.alpha) >= 0.0 {
            hi = lo;
        }
        lo = Point { alpha, phi, dphi };
    }

    // Fall back to the best sufficient-decrease point seen, if any.
    if lo.alpha > 0.0 && lo.phi < f0 {
        let xa = x + p * lo.alpha;
        let g = obj.gradient(&xa);
        return Some(Step {
            alpha: lo.alpha,
            x: xa,
            f: lo.phi,
            g,
        });
    }
    None
}
