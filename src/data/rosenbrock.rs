//! The Rosenbrock test function with its analytic derivatives.

use nalgebra::{DMatrix, DVector};

use crate::optimize::Objective;

/// `f(x, y) = (1 − x)² + 100 (y − x²)²`, global minimum `f(1, 1) = 0`.
#[derive(Copy, Clone, Debug, Default)]
pub struct Rosenbrock;

impl Rosenbrock {
    pub fn value_at(x: f64, y: f64) -> f64 {
        (1.0 - x).powi(2) + 100.0 * (y - x * x).powi(2)
    }

    pub fn gradient_at(x: f64, y: f64) -> [f64; 2] {
        [
            -400.0 * x * y + 400.0 * x.powi(3) + 2.0 * x - 2.0,
            200.0 * y - 200.0 * x * x,
        ]
    }

    pub fn hessian_at(x: f64, y: f64) -> [[f64; 2]; 2] {
        [
            [-400.0 * y + 1200.0 * x * x + 2.0, -400.0 * x],
            [-400.0 * x, 200.0],
        ]
    }
}

impl Objective for Rosenbrock {
    fn value(&self, v: &DVector<f64>) -> f64 {
        Self::value_at(v[0], v[1])
    }

    fn gradient(&self, v: &DVector<f64>) -> DVector<f64> {
        let [gx, gy] = Self::gradient_at(v[0], v[1]);
        DVector::from_vec(vec![gx, gy])
    }

    fn hessian(&self, v: &DVector<f64>) -> DMatrix<f64> {
        let [[a, b], [c, d]] = Self::hessian_at(v[0], v[1]);
        DMatrix::from_row_slice(2, 2, &[a, b, c, d])
    }
}
