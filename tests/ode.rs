use ivp::prelude::ODE;
use sciplot_demos::data::samples::linspace;
use sciplot_demos::data::van_der_pol::{integrate, Tolerances, VanDerPol};
use sciplot_demos::DemoError;

struct Harmonic;

impl ODE for Harmonic {
    fn ode(&self, _t: f64, y: &[f64], dydt: &mut [f64]) {
        dydt[0] = y[1];
        dydt[1] = -y[0];
    }
}

/// Two uncoupled decays with rates `k` and `2k`.
struct Decay(f64);

impl ODE for Decay {
    fn ode(&self, _t: f64, y: &[f64], dydt: &mut [f64]) {
        dydt[0] = -self.0 * y[0];
        dydt[1] = -2.0 * self.0 * y[1];
    }
}

fn tight() -> Tolerances {
    Tolerances {
        rtol: 1e-10,
        atol: 1e-12,
    }
}

#[test]
fn harmonic_oscillator_matches_closed_form() {
    let ts = linspace(0.0, 10.0, 201);
    let tr = integrate(&Harmonic, [1.0, 0.0], ts.clone(), tight()).unwrap();
    assert_eq!(tr.t, ts);
    assert_eq!(tr.x.len(), 201);
    for ((t, x), v) in tr.t.iter().zip(&tr.x).zip(&tr.dx) {
        assert!((x - t.cos()).abs() < 1e-6, "x({t}) = {x}");
        assert!((v + t.sin()).abs() < 1e-6, "v({t}) = {v}");
    }
}

#[test]
fn first_sample_is_the_initial_state() {
    let tr = integrate(&Harmonic, [0.0, 1.0], linspace(0.0, 5.0, 50), Tolerances::default()).unwrap();
    assert!(tr.x[0].abs() < 1e-12);
    assert!((tr.dx[0] - 1.0).abs() < 1e-12);
}

#[test]
fn default_tolerances_track_several_periods() {
    let tr = integrate(&Harmonic, [2.0, 0.0], linspace(0.0, 25.0, 500), Tolerances::default()).unwrap();
    for (t, x) in tr.t.iter().zip(&tr.x) {
        assert!((x - 2.0 * t.cos()).abs() < 0.05, "x({t}) = {x}");
    }
}

#[test]
fn exponential_decay_on_an_offset_grid() {
    let tr = integrate(&Decay(0.5), [3.0, 1.0], linspace(2.0, 10.0, 81), tight()).unwrap();
    for ((t, a), b) in tr.t.iter().zip(&tr.x).zip(&tr.dx) {
        let s = t - 2.0;
        assert!((a - 3.0 * (-0.5 * s).exp()).abs() < 1e-6, "a({t}) = {a}");
        assert!((b - (-s).exp()).abs() < 1e-6, "b({t}) = {b}");
    }
}

#[test]
fn degenerate_grids_are_rejected() {
    for grid in [vec![], vec![1.0], vec![1.0, 1.0], vec![2.0, 1.0]] {
        let n = grid.len();
        match integrate(&Harmonic, [1.0, 0.0], grid, Tolerances::default()) {
            Err(DemoError::Solver(msg)) => assert!(msg.contains("spans no interval"), "{msg}"),
            other => panic!("grid of {n} points gave {other:?}"),
        }
    }
}

#[test]
fn zero_damping_van_der_pol_is_harmonic() {
    let ts = linspace(0.0, 6.0, 61);
    let vdp = integrate(&VanDerPol { mu: 0.0 }, [2.0, 0.0], ts.clone(), tight()).unwrap();
    let sho = integrate(&Harmonic, [2.0, 0.0], ts, tight()).unwrap();
    for (a, b) in vdp.x.iter().zip(&sho.x) {
        assert!((a - b).abs() < 1e-8);
    }
}
