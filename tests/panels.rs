use std::path::PathBuf;

use egui::{pos2, vec2, CentralPanel, Context, RawInput, Rect};
use sciplot_demos::{
    DemoError, DemoPanel, LissajousPanel, RosenbrockPanel, VanDerPolConfig, VanDerPolPanel,
};

#[test]
fn export_request_is_taken_once() {
    let mut panel = VanDerPolPanel::new(&VanDerPolConfig::default()).unwrap();
    assert!(panel.take_export_request().is_none());

    panel.state.set_mu_raw(12).unwrap();
    panel.request_export();
    assert_eq!(
        panel.take_export_request(),
        Some(PathBuf::from("VdP plot mu = 1.2.png"))
    );
    assert!(panel.take_export_request().is_none());
}

#[test]
fn export_outcome_lands_in_status_bar() {
    let mut panel = VanDerPolPanel::new(&VanDerPolConfig::default()).unwrap();
    assert!(panel.status().is_none());

    panel.export_finished(Err(DemoError::EmptyCapture));
    assert!(panel.status().unwrap().starts_with("Export failed"));

    panel.export_finished(Ok(PathBuf::from("VdP plot mu = 0.0.png")));
    assert_eq!(panel.status(), Some("Saved VdP plot mu = 0.0.png"));
}

#[test]
fn panels_have_titles_and_no_plot_before_first_frame() {
    let l = LissajousPanel::default();
    let r = RosenbrockPanel::default();
    assert_eq!(l.title(), "Lissajous figure");
    assert_eq!(r.title(), "Rosenbrock function minimization");
    assert!(l.plot_rect().is_none());
    assert!(r.status().is_none());
}

#[test]
fn van_der_pol_window_title() {
    let panel = VanDerPolPanel::new(&VanDerPolConfig::default()).unwrap();
    assert_eq!(
        panel.title(),
        "PyQt5 Example. Van der Pol oscillator solution."
    );
}

/// Render `panel` headlessly into an 800×600 screen and return the central
/// panel's content rect.
fn render_frames(panel: &mut VanDerPolPanel, frames: usize) -> Rect {
    let ctx = Context::default();
    let mut area = Rect::NOTHING;
    for _ in 0..frames {
        let input = RawInput {
            screen_rect: Some(Rect::from_min_size(pos2(0.0, 0.0), vec2(800.0, 600.0))),
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| {
            CentralPanel::default().show(ctx, |ui| {
                area = ui.max_rect();
                panel.render_plot(ui);
            });
        });
    }
    area
}

#[test]
fn export_rect_covers_title_and_axes() {
    let mut panel = VanDerPolPanel::new(&VanDerPolConfig::default()).unwrap();
    let area = render_frames(&mut panel, 2);
    let rect = panel.plot_rect().expect("plot drawn");

    // the y tick labels sit left of the data area, the x axis label below it
    // and the title above it; all of them belong in the exported image
    assert!(rect.left() - area.left() < 1.0, "left strip cut: {rect:?} in {area:?}");
    assert!(area.bottom() - rect.bottom() < 1.0, "bottom strip cut: {rect:?} in {area:?}");
    assert!(rect.top() - area.top() < 1.0, "title cut: {rect:?} in {area:?}");
    assert!(area.expand(1.0).contains_rect(rect));
}
