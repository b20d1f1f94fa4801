//! Shared plot rendering driven by a [`PlotView`].

use egui::{InnerResponse, Ui};
use egui_plot::{Line, Plot, PlotPoints, PlotResponse, PlotUi, Points};

use crate::data::plot_view::{Pen, PlotView};

/// Show a titled plot configured from `view`, then let `add` draw items.
///
/// The outer response covers the title, axes and tick labels; the inner
/// [`PlotResponse`] only covers the data area. Pending fit and range requests
/// on the view are consumed here.
pub fn show_view<R>(
    ui: &mut Ui,
    id: &str,
    view: &mut PlotView,
    add: impl FnOnce(&mut PlotUi) -> R,
) -> InnerResponse<PlotResponse<R>> {
    ui.vertical(|ui| titled_plot(ui, id, view, add))
}

fn titled_plot<R>(
    ui: &mut Ui,
    id: &str,
    view: &mut PlotView,
    add: impl FnOnce(&mut PlotUi) -> R,
) -> PlotResponse<R> {
    if !view.title.is_empty() {
        ui.vertical_centered(|ui| {
            for line in view.title.lines() {
                ui.strong(line);
            }
        });
    }

    let mut plot = Plot::new(id)
        .x_axis_label(view.x_axis.label.clone())
        .y_axis_label(view.y_axis.label.clone())
        .show_grid(view.show_grid)
        .allow_double_click_reset(false);
    if view.aspect_locked {
        plot = plot.data_aspect(1.0);
    }

    let fit = view.take_fit_request();
    let bounds_dirty = view.take_bounds_dirty();
    let x_range = view.x_axis.range;
    let y_range = view.y_axis.range;

    // the plot fills this area, but only allocates the data rect in it
    let plot_area = ui.available_rect_before_wrap();
    let resp = plot.show(ui, |plot_ui| {
        if fit {
            plot_ui.set_auto_bounds(egui::Vec2b::new(true, true));
        } else if bounds_dirty {
            if let Some((lo, hi)) = x_range {
                plot_ui.set_plot_bounds_x(lo..=hi);
            }
            if let Some((lo, hi)) = y_range {
                plot_ui.set_plot_bounds_y(lo..=hi);
            }
        }
        add(plot_ui)
    });
    if plot_area.is_finite() {
        ui.expand_to_include_rect(plot_area.union(resp.response.rect));
    }
    resp
}

/// Draw `points` as a line with `pen`, plus its markers if it has any.
pub fn draw_series(plot_ui: &mut PlotUi, name: &str, points: Vec<[f64; 2]>, pen: &Pen) {
    let markers = pen.marker.as_ref().map(|m| {
        Points::new(name.to_owned(), PlotPoints::from(points.clone()))
            .shape(m.shape)
            .radius(m.radius)
            .color(m.fill)
            .filled(true)
    });
    plot_ui.line(
        Line::new(name.to_owned(), points)
            .color(pen.color)
            .width(pen.width)
            .style(pen.style),
    );
    if let Some(markers) = markers {
        plot_ui.points(markers);
    }
}
