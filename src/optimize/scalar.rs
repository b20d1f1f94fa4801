//! One-dimensional minimization: downhill bracketing and Brent's method.

const GOLDEN: f64 = 1.618_033_988_749_895;
const CGOLD: f64 = 0.381_966_011_250_105;
const GROW_LIMIT: f64 = 110.0;
const MAX_BRACKET_ITER: usize = 1000;
const BRENT_MAX_ITER: usize = 500;
const TINY: f64 = 1e-21;

/// A triple `a, b, c` with `f(b) < f(a)` and `f(b) < f(c)`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Bracket {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub fb: f64,
}

/// Expand downhill from `(xa, xb)` until the minimum is bracketed.
pub(crate) fn bracket<F: FnMut(f64) -> f64>(f: &mut F, xa: f64, xb: f64) -> Option<Bracket> {
    let (mut xa, mut xb) = (xa, xb);
    let mut fa = f(xa);
    let mut fb = f(xb);
    if fa < fb {
        std::mem::swap(&mut xa, &mut xb);
        std::mem::swap(&mut fa, &mut fb);
    }
    let mut xc = xb + GOLDEN * (xb - xa);
    let mut fc = f(xc);

    let mut iter = 0;
    while fc < fb {
        iter += 1;
        if iter > MAX_BRACKET_ITER {
            return None;
        }
        let tmp1 = (xb - xa) * (fb - fc);
        let tmp2 = (xb - xc) * (fb - fa);
        let val = tmp2 - tmp1;
        let denom = if val.abs() < TINY { 2.0 * TINY } else { 2.0 * val };
        let mut w = xb - ((xb - xc) * tmp2 - (xb - xa) * tmp1) / denom;
        let wlim = xb + GROW_LIMIT * (xc - xb);
        let mut fw;
        if (w - xc) * (xb - w) > 0.0 {
            fw = f(w);
            if fw < fc {
                return Some(order(xb, w, xc, fw));
            } else if fw > fb {
                return Some(order(xa, xb, w, fb));
            }
            w = xc + GOLDEN * (xc - xb);
            fw = f(w);
        } else if (w - wlim) * (wlim - xc) >= 0.0 {
            w = wlim;
            fw = f(w);
        } else if (w - wlim) * (xc - w) > 0.0 {
            fw = f(w);
            if fw < fc {
                xb = xc;
                xc = w;
                w = xc + GOLDEN * (xc - xb);
                fb = fc;
                fc = fw;
                fw = f(w);
            }
        } else {
            w = xc + GOLDEN * (xc - xb);
            fw = f(w);
        }
        xa = xb;
        xb = xc;
        xc = w;
        fa = fb;
        fb = fc;
        fc = fw;
    }
    Some(order(xa, xb, xc, fb))
}

fn order(a: f64, b: f64, c: f64, fb: f64) -> Bracket {
    if a <= c {
        Bracket { a, b, c, fb }
    } else {
        Bracket { a: c, b, c: a, fb }
    }
}

/// Brent's method inside `br`; returns `(x_min, f_min)`.
pub(crate) fn brent<F: FnMut(f64) -> f64>(f: &mut F, br: Bracket, tol: f64) -> (f64, f64) {
    const MINTOL: f64 = 1.0e-11;
    let (mut a, mut b) = (br.a, br.c);
    let mut x = br.b;
    let mut w = x;
    let mut v = x;
    let mut fx = br.fb;
    let mut fw = fx;
    let mut fv = fx;
    let mut deltax: f64 = 0.0;
    let mut rat: f64 = 0.0;

    for _ in 0..BRENT_MAX_ITER {
        let tol1 = tol * x.abs() + MINTOL;
        let tol2 = 2.0 * tol1;
        let xmid = 0.5 * (a + b);
        if (x - xmid).abs() < tol2 - 0.5 * (b - a) {
            break;
        }
        if deltax.abs() <= tol1 {
            deltax = if x >= xmid { a - x } else { b - x };
            rat = CGOLD * deltax;
        } else {
            let tmp1 = (x - w) * (fx - fv);
            let mut tmp2 = (x - v) * (fx - fw);
            let mut p = (x - v) * tmp2 - (x - w) * tmp1;
            tmp2 = 2.0 * (tmp2 - tmp1);
            if tmp2 > 0.0 {
                p = -p;
            }
            tmp2 = tmp2.abs();
            let dx_temp = deltax;
            deltax = rat;
            if p > tmp2 * (a - x) && p < tmp2 * (b - x) && p.abs() < (0.5 * tmp2 * dx_temp).abs()
            {
                rat = p / tmp2;
                let u = x + rat;
                if (u - a) < tol2 || (b - u) < tol2 {
                    rat = if xmid - x >= 0.0 { tol1 } else { -tol1 };
                }
            } else {
                deltax = if x >= xmid { a - x } else { b - x };
                rat = CGOLD * deltax;
            }
        }

        let u = if rat.abs() < tol1 {
            if rat >= 0.0 {
                x + tol1
            } else {
                x - tol1
            }
        } else {
            x + rat
        };
        let fu = f(u);

        if fu > fx {
            if u < x {
                a = u;
            } else {
                b = u;
            }
            if fu <= fw || w == x {
                v = w;
                w = u;
                fv = fw;
                fw = fu;
            } else if fu <= fv || v == x || v == w {
                v = u;
                fv = fu;
            }
        } else {
            if u >= x {
                a = x;
            } else {
                b = x;
            }
            v = w;
            w = x;
            x = u;
            fv = fw;
            fw = fx;
            fx = fu;
        }
    }
    (x, fx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brent_finds_parabola_minimum() {
        let mut f = |x: f64| (x - 1.5) * (x - 1.5) + 2.0;
        let br = bracket(&mut f, 0.0, 1.0).expect("bracket");
        assert!(br.a <= br.b && br.b <= br.c);
        let (x, fx) = brent(&mut f, br, 1.48e-8);
        assert!((x - 1.5).abs() < 1e-6);
        assert!((fx - 2.0).abs() < 1e-10);
    }
}
