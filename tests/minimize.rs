use nalgebra::DVector;
use sciplot_demos::data::rosenbrock::Rosenbrock;
use sciplot_demos::optimize::{
    minimize, Method, MinimizeOptions, Objective, OptimizeError, OptimizeResult,
};

type Run = (Result<OptimizeResult, OptimizeError>, Vec<[f64; 2]>);

fn run(method: Method, start: [f64; 2], tol: f64) -> Run {
    let opts = MinimizeOptions {
        tol,
        ..Default::default()
    };
    let mut visited = Vec::new();
    let res = minimize(&Rosenbrock, &start, method, &opts, |xk| {
        visited.push([xk[0], xk[1]])
    });
    (res, visited)
}

#[test]
fn rosenbrock_minimum_is_flat() {
    assert_eq!(Rosenbrock::value_at(1.0, 1.0), 0.0);
    assert_eq!(Rosenbrock::gradient_at(1.0, 1.0), [0.0, 0.0]);
    let x = DVector::from_vec(vec![1.0, 1.0]);
    assert_eq!(Rosenbrock.gradient(&x).amax(), 0.0);
    let h = Rosenbrock.hessian(&x);
    assert_eq!(h[(0, 0)], 802.0);
    assert_eq!(h[(0, 1)], -400.0);
    assert_eq!(h[(1, 0)], -400.0);
    assert_eq!(h[(1, 1)], 200.0);
}

#[test]
fn rosenbrock_matches_known_values() {
    assert_eq!(Rosenbrock::value_at(0.0, 0.0), 1.0);
    assert!((Rosenbrock::value_at(-1.2, 1.0) - 24.2).abs() < 1e-12);
    let [gx, gy] = Rosenbrock::gradient_at(-1.2, 1.0);
    assert!((gx + 215.6).abs() < 1e-9);
    assert!((gy + 88.0).abs() < 1e-9);
}

#[test]
fn gradient_methods_stop_immediately_at_the_minimum() {
    for &m in Method::all().iter().filter(|m| m.uses_gradient()) {
        let (res, visited) = run(m, [1.0, 1.0], 1e-6);
        let res = res.unwrap_or_else(|e| panic!("{m} failed: {e}"));
        assert_eq!(res.nit, 0, "{m} iterated");
        assert!(visited.is_empty(), "{m} called back");
        assert!(res.success, "{m}: {}", res.message);
        assert_eq!((res.x[0], res.x[1]), (1.0, 1.0));
        assert_eq!(res.fun, 0.0);
    }
}

#[test]
fn every_method_converges_from_the_classic_start() {
    for &m in Method::all() {
        let (res, visited) = run(m, [-1.2, 1.0], 1e-8);
        let res = match res {
            Ok(res) => res,
            // dogleg needs a convex model and may meet an indefinite Hessian
            Err(OptimizeError::HessianNotPositiveDefinite(_)) if m == Method::Dogleg => continue,
            Err(e) => panic!("{m} failed: {e}"),
        };
        assert!(
            (res.x[0] - 1.0).abs() < 1e-3 && (res.x[1] - 1.0).abs() < 1e-3,
            "{m} ended at ({}, {}) after {} iterations: {}",
            res.x[0],
            res.x[1],
            res.nit,
            res.message
        );
        assert!(res.fun < 1e-5, "{m}: f = {}", res.fun);
        assert_eq!(visited.len(), res.nit, "{m}: one callback per iteration");
        assert!(res.nfev > 0);
    }
}

#[test]
fn dogleg_rejects_an_indefinite_hessian() {
    // at (0, 1) the Hessian is diag(-398, 200)
    let (res, visited) = run(Method::Dogleg, [0.0, 1.0], 1e-6);
    assert_eq!(
        res.unwrap_err(),
        OptimizeError::HessianNotPositiveDefinite("dogleg")
    );
    assert!(visited.is_empty());

    // the exact and Steihaug subproblems handle negative curvature
    for m in [Method::TrustExact, Method::TrustNcg] {
        let (res, _) = run(m, [0.0, 1.0], 1e-8);
        let res = res.unwrap();
        assert!((res.x[0] - 1.0).abs() < 1e-3, "{m} ended at {}", res.x[0]);
    }
}

#[test]
fn derivative_free_methods_ignore_derivatives() {
    for m in [Method::NelderMead, Method::Powell] {
        let (res, _) = run(m, [-1.2, 1.0], 1e-6);
        let res = res.unwrap();
        assert_eq!(res.njev, 0, "{m}");
        assert_eq!(res.nhev, 0, "{m}");
    }
}

#[test]
fn iteration_cap_is_reported() {
    let opts = MinimizeOptions {
        tol: 1e-12,
        max_iter: Some(3),
    };
    let mut calls = 0;
    let res = minimize(&Rosenbrock, &[-1.2, 1.0], Method::Bfgs, &opts, |_| calls += 1).unwrap();
    assert_eq!(res.nit, 3);
    assert_eq!(calls, 3);
    assert!(!res.success);
}

#[test]
fn method_names_are_distinct_display_strings() {
    let names: Vec<&str> = Method::all().iter().map(|m| m.name()).collect();
    for (i, &m) in Method::all().iter().enumerate() {
        assert_eq!(m.to_string(), m.name());
        assert!(!names[..i].contains(&m.name()), "duplicate name {m}");
    }
    assert_eq!(Method::NelderMead.name(), "Nelder-Mead");
}

#[test]
fn method_capabilities() {
    assert!(!Method::NelderMead.uses_gradient());
    assert!(!Method::Powell.uses_hessian());
    assert!(Method::Bfgs.uses_gradient() && !Method::Bfgs.uses_hessian());
    assert!(Method::TrustExact.uses_hessian());
    assert_eq!(Method::all().len(), 9);
}

#[test]
fn non_finite_start_is_rejected() {
    let (res, visited) = run(Method::Bfgs, [f64::NAN, 0.0], 1e-6);
    assert_eq!(res.unwrap_err(), OptimizeError::NonFiniteStart);
    assert!(visited.is_empty());
}
