use sciplot_demos::data::van_der_pol::{OscillatorState, ViewMode};
use sciplot_demos::VanDerPolConfig;

fn default_state() -> OscillatorState {
    OscillatorState::new(&VanDerPolConfig::default()).unwrap()
}

#[test]
fn starts_undamped_in_time_series_mode() {
    let state = default_state();
    assert_eq!(state.mu_value(), 0.0);
    assert_eq!(state.mode(), ViewMode::TimeSeries);
    assert_eq!(
        state.view.title,
        "Van der Pol oscillator ODE solution for μ = 0.0"
    );
    assert_eq!(state.view.x_axis.label, "t");
    assert_eq!(state.view.y_axis.label, "x(t)");
    assert!(!state.view.aspect_locked);
    assert!(state.view.fit_pending());

    let buf = state.buffer();
    assert_eq!(buf.len(), 500);
    assert_eq!(buf.x[0], 0.0);
    assert_eq!(buf.x[499], 25.0);
    assert!((buf.y[0] - 2.0).abs() < 1e-12);

    let tr = state.trajectory();
    assert_eq!(tr.t, buf.x);
    assert!(tr.dx[0].abs() < 1e-12);
}

#[test]
fn undamped_phase_portrait_is_a_circle() {
    let mut state = default_state();
    state.set_mode(ViewMode::PhasePortrait).unwrap();
    let buf = state.buffer();

    assert!((buf.x[0] - 2.0).abs() < 1e-12 && buf.y[0].abs() < 1e-12);
    for (&x, &v) in buf.x.iter().zip(&buf.y) {
        let r = x.hypot(v);
        assert!((r - 2.0).abs() < 0.1, "radius {r} drifted from 2");
    }

    // clockwise winding: every consecutive pair turns the same way
    for i in 1..buf.len() {
        let (x0, y0, x1, y1) = (buf.x[i - 1], buf.y[i - 1], buf.x[i], buf.y[i]);
        let turn = (x0 * y1 - y0 * x1).atan2(x0 * x1 + y0 * y1);
        assert!(turn < 0.0, "winding reversed at sample {i}");
    }
}

#[test]
fn undamped_time_series_follows_cosine() {
    let state = default_state();
    let buf = state.buffer();
    for (&t, &x) in buf.x.iter().zip(&buf.y) {
        assert!((x - 2.0 * t.cos()).abs() < 0.1, "x({t}) = {x}");
    }
}

#[test]
fn mode_switch_keeps_mu_and_solution() {
    let mut state = default_state();
    state.set_mu_raw(15).unwrap();
    assert_eq!(state.mu_value(), 1.5);
    let (series, portrait) = state.projections();
    assert_eq!(state.buffer(), &series);

    state.set_mode(ViewMode::PhasePortrait).unwrap();
    assert_eq!(state.mu_value(), 1.5);
    assert_eq!(state.buffer(), &portrait);
    assert_eq!(state.view.x_axis.label, "x(t)");
    assert_eq!(state.view.y_axis.label, "x'(t)");
    assert!(state.view.aspect_locked);
    assert!(state.view.title.ends_with("μ = 1.5"));

    // x-values of the portrait are the time series' y-values
    assert_eq!(portrait.x, series.y);

    state.set_mode(ViewMode::TimeSeries).unwrap();
    assert_eq!(state.buffer(), &series);
    assert!(!state.view.aspect_locked);
}

#[test]
fn damped_oscillator_settles_on_limit_cycle() {
    let mut state = default_state();
    state.set_mu_raw(20).unwrap();
    let buf = state.buffer();
    let tail_max = buf.y[400..].iter().map(|v| v.abs()).fold(0.0, f64::max);
    // the Van der Pol limit cycle has amplitude close to 2 for moderate μ
    assert!((tail_max - 2.0).abs() < 0.1, "amplitude {tail_max}");
}

#[test]
fn each_change_requests_a_fit() {
    let mut state = default_state();
    assert!(state.view.take_fit_request());
    assert!(!state.view.fit_pending());
    state.set_mu_raw(5).unwrap();
    assert!(state.view.fit_pending());
    state.view.take_fit_request();
    state.set_mode(ViewMode::PhasePortrait).unwrap();
    assert!(state.view.fit_pending());
}

#[test]
fn export_file_name_tracks_mu() {
    let mut state = default_state();
    assert_eq!(state.export_file_name(), "VdP plot mu = 0.0.png");
    state.set_mu_raw(25).unwrap();
    assert_eq!(state.export_file_name(), "VdP plot mu = 2.5.png");
    state.set_mu_raw(100).unwrap();
    assert_eq!(state.export_file_name(), "VdP plot mu = 10.0.png");
}
