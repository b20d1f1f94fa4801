use egui::PointerButton;
use sciplot_demos::data::minimizer::{MinimizerState, RunReport, RunState};
use sciplot_demos::optimize::Method;
use sciplot_demos::optimize::OptimizeError;
use sciplot_demos::{DemoError, DemoPanel, RosenbrockConfig, RosenbrockPanel};

fn small_state() -> MinimizerState {
    // coarse grid keeps the contour build cheap
    let cfg = RosenbrockConfig {
        resolution: 60,
        levels: 10,
        ..Default::default()
    };
    MinimizerState::new(&cfg)
}

#[test]
fn starts_idle_without_a_path() {
    let state = small_state();
    assert_eq!(state.method(), Method::NelderMead);
    assert_eq!(state.run_state(), RunState::Idle);
    assert!(state.path().is_none());
    assert!(state.last_report().is_none());
    assert!(!state.contours().is_empty());
    assert_eq!(
        state.view.title,
        "Rosenbrock function minimization.\nDouble click for initial point"
    );
    assert!(state.view.aspect_locked);
    assert_eq!(state.view.x_axis.range, Some((-4.0, 4.0)));
}

#[test]
fn only_primary_double_click_starts_a_run() {
    let mut state = small_state();
    assert!(state
        .on_pointer(PointerButton::Primary, false, [0.0, 0.0])
        .is_none());
    assert!(state
        .on_pointer(PointerButton::Secondary, true, [0.0, 0.0])
        .is_none());
    assert!(state
        .on_pointer(PointerButton::Middle, true, [0.0, 0.0])
        .is_none());
    assert!(state.path().is_none());

    let report = state
        .on_pointer(PointerButton::Primary, true, [-1.2, 1.0])
        .expect("double click runs")
        .unwrap();
    assert_eq!(report.method, Method::NelderMead);
    assert!((report.x - 1.0).abs() < 1e-2 && (report.y - 1.0).abs() < 1e-2);
    assert_eq!(state.run_state(), RunState::Idle);
}

#[test]
fn trace_starts_at_click_and_has_one_point_per_iteration() {
    let mut state = small_state();
    state.select_method(Method::Bfgs);
    let report = state.run_from([-1.2, 1.0]).unwrap();
    let path = state.path().unwrap();
    assert_eq!(path.points().first(), Some(&[-1.2, 1.0]));
    assert_eq!(path.points().len(), report.nit + 1);
    let last = *path.points().last().unwrap();
    assert_eq!(last, [report.x, report.y]);
}

#[test]
fn second_double_click_replaces_the_path() {
    let mut state = small_state();
    state.select_method(Method::Cg);
    state.run_from([-1.2, 1.0]).unwrap();
    let first_len = state.path().unwrap().points().len();
    assert!(first_len > 1);

    state
        .on_pointer(PointerButton::Primary, true, [1.0, 1.0])
        .unwrap()
        .unwrap();
    let path = state.path().unwrap();
    assert_eq!(path.points(), &[[1.0, 1.0]]);
}

#[test]
fn gradient_methods_at_minimum_leave_only_the_start_point() {
    let mut state = small_state();
    for &m in Method::all().iter().filter(|m| m.uses_gradient()) {
        state.select_method(m);
        let report = state.run_from([1.0, 1.0]).unwrap();
        assert_eq!(report.nit, 0, "{m}");
        assert_eq!(state.path().unwrap().points().len(), 1, "{m}");
        assert_eq!(
            report.status_line(),
            format!("Method: {m}, Xmin = 1.00, Ymin = 1.00, f(x, y) = 0.00")
        );
    }
}

#[test]
fn status_line_rounds_to_two_decimals() {
    let report = RunReport {
        method: Method::TrustExact,
        x: 0.999_999,
        y: -0.004,
        fun: 12.3456,
        nit: 7,
        success: true,
        message: String::new(),
    };
    assert_eq!(
        report.status_line(),
        "Method: trust-exact, Xmin = 1.00, Ymin = -0.00, f(x, y) = 12.35"
    );
}

#[test]
fn contour_colors_span_the_jet_map() {
    let state = small_state();
    let lines = state.contours();
    let lowest = lines.iter().map(|l| l.level).fold(f64::INFINITY, f64::min);
    let highest = lines.iter().map(|l| l.level).fold(f64::NEG_INFINITY, f64::max);
    assert!(lowest < highest);
    assert_ne!(state.level_color(lowest), state.level_color(highest));
}

#[test]
fn dogleg_failure_clears_the_previous_path() {
    let mut state = small_state();
    state.select_method(Method::Bfgs);
    state.run_from([-1.2, 1.0]).unwrap();
    assert!(state.path().is_some());
    assert!(state.last_report().is_some());

    state.select_method(Method::Dogleg);

    // the Hessian at (0, 1) is diag(-398, 200)
    let err = state
        .on_pointer(PointerButton::Primary, true, [0.0, 1.0])
        .unwrap()
        .unwrap_err();
    assert!(matches!(
        err,
        DemoError::Optimize(OptimizeError::HessianNotPositiveDefinite("dogleg"))
    ));
    assert!(state.path().is_none());
    assert!(state.last_report().is_none());
    assert_eq!(state.run_state(), RunState::Idle);
}

#[test]
fn failed_run_is_reported_in_the_status_bar() {
    let mut panel = RosenbrockPanel::new(&RosenbrockConfig {
        resolution: 60,
        levels: 10,
        default_method: Method::Dogleg,
        ..Default::default()
    });
    panel.handle_pointer(PointerButton::Primary, true, [0.0, 1.0]);
    let status = panel.status().unwrap();
    assert!(status.starts_with("Method: dogleg, "), "{status}");
    assert!(status.contains("not positive definite"), "{status}");
    assert!(panel.state.path().is_none());
}
